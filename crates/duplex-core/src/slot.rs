//! Handles that can live in a [`ListHandle`](crate::ListHandle) slot.

use crate::config::RuntimeConfig;
use crate::element::Element;
use crate::error::RuntimeError;
use crate::matrix::MatrixHandle;
use crate::vector::VectorHandle;

/// A runtime handle usable as a list element.
///
/// Lists need to create fresh elements (on `resize` and `push_back_new`)
/// and to deep-copy caller-owned elements (on `push_back_copy`).
pub trait Slot: Sized {
    /// A fresh, empty element under `config`.
    fn init_default(config: &RuntimeConfig) -> Result<Self, RuntimeError>;

    /// A deep copy of `self`.
    fn init_copy(&self) -> Result<Self, RuntimeError>;
}

impl<T: Element> Slot for VectorHandle<T> {
    fn init_default(config: &RuntimeConfig) -> Result<Self, RuntimeError> {
        Ok(VectorHandle::new_in(config))
    }

    fn init_copy(&self) -> Result<Self, RuntimeError> {
        VectorHandle::init_copy(self)
    }
}

impl<T: Element> Slot for MatrixHandle<T> {
    fn init_default(config: &RuntimeConfig) -> Result<Self, RuntimeError> {
        Ok(MatrixHandle::new_in(config))
    }

    fn init_copy(&self) -> Result<Self, RuntimeError> {
        MatrixHandle::init_copy(self)
    }
}
