//! The owning/aliasing duality.
//!
//! [`Storage`] is how every wrapper holds its runtime handle. The variant
//! is the mode: there is no separate flag to get out of sync with it, and
//! the borrow checker keeps an alias from outliving the handle it points at.

use std::mem;
use std::ptr;

use crate::error::ContainerError;

/// A handle held either by value or by exclusive borrow.
#[derive(Debug)]
pub enum Storage<'a, H> {
    /// The wrapper owns the handle and drops it with itself.
    Owned(H),
    /// The wrapper views a handle owned elsewhere and never drops it.
    Aliased(&'a mut H),
    /// Moved-from: the contents were transferred elsewhere.
    Empty,
}

/// Which [`Storage`] variant a wrapper is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Responsible for releasing the buffer.
    Owning,
    /// A view onto a buffer owned elsewhere.
    Aliasing,
    /// Holds nothing.
    MovedFrom,
}

impl<'a, H> Storage<'a, H> {
    /// The current mode.
    pub fn mode(&self) -> Mode {
        match self {
            Self::Owned(_) => Mode::Owning,
            Self::Aliased(_) => Mode::Aliasing,
            Self::Empty => Mode::MovedFrom,
        }
    }

    /// The handle, unless moved-from.
    pub fn get(&self) -> Option<&H> {
        match self {
            Self::Owned(h) => Some(h),
            Self::Aliased(h) => Some(&**h),
            Self::Empty => None,
        }
    }

    /// The handle mutably, unless moved-from.
    pub fn get_mut(&mut self) -> Option<&mut H> {
        match self {
            Self::Owned(h) => Some(h),
            Self::Aliased(h) => Some(&mut **h),
            Self::Empty => None,
        }
    }

    /// The handle mutably, or the moved-from error.
    pub fn live_mut(&mut self) -> Result<&mut H, ContainerError> {
        self.get_mut().ok_or_else(ContainerError::moved_from)
    }

    /// Move the storage out, leaving [`Storage::Empty`] behind.
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::Empty)
    }

    /// The owned handle. `None` for aliases and moved-from storage.
    pub fn into_owned(self) -> Option<H> {
        match self {
            Self::Owned(h) => Some(h),
            Self::Aliased(_) | Self::Empty => None,
        }
    }

    /// Whether both storages refer to the very same handle.
    pub fn same_handle(&self, other: &Storage<'_, H>) -> bool {
        match (self.get(), other.get()) {
            (Some(a), Some(b)) => ptr::eq(a, b),
            _ => false,
        }
    }
}
