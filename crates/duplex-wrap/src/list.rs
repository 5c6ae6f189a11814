//! Owning/aliasing wrapper over a list of nested runtime handles.
//!
//! A [`List`] owns every element slot. Values go in by move
//! ([`List::push_back`], [`List::set`]); the `*_aliased` forms hand the
//! caller back an aliasing wrapper onto the slot the value now lives in.
//! Mutable access and iteration produce aliasing wrappers that write
//! straight into the slots; [`List::pop_back`] and [`List::remove`] hand
//! ownership back out as owning wrappers.

use std::fmt;

use duplex_core::{Element, ListHandle, MatrixHandle, RuntimeConfig, Slot, VectorHandle};
use tracing::debug;

use crate::error::ContainerError;
use crate::matrix::Matrix;
use crate::storage::{Mode, Storage};
use crate::vector::Vector;

/// A runtime handle with a matching wrapper type.
pub trait Wrap: Slot {
    /// The wrapper that owns or aliases a handle of this kind.
    type Wrapper<'a>: From<Storage<'a, Self>> + Into<Storage<'a, Self>>
    where
        Self: 'a;
}

impl<T: Element> Wrap for VectorHandle<T> {
    type Wrapper<'a>
        = Vector<'a, T>
    where
        Self: 'a;
}

impl<T: Element> Wrap for MatrixHandle<T> {
    type Wrapper<'a>
        = Matrix<'a, T>
    where
        Self: 'a;
}

fn alias_of<'l, H: Wrap + 'l>(handle: &'l mut H) -> H::Wrapper<'l> {
    From::from(Storage::Aliased(handle))
}

fn owned_of<'l, H: Wrap + 'l>(handle: H) -> H::Wrapper<'l> {
    From::from(Storage::Owned(handle))
}

/// Turn a caller's wrapper into a handle the list can own.
///
/// An owning wrapper gives up its handle. An alias cannot give away a
/// handle it does not own, so the list stores a deep copy instead.
fn adopt<'v, H: Wrap + 'v>(value: H::Wrapper<'v>) -> Result<H, ContainerError> {
    let storage: Storage<'v, H> = value.into();
    match storage {
        Storage::Owned(handle) => Ok(handle),
        Storage::Aliased(handle) => {
            debug!("storing a copy of an aliased element");
            Ok(handle.init_copy()?)
        }
        Storage::Empty => Err(ContainerError::moved_from()),
    }
}

/// A growable list of vectors or matrices.
///
/// Not `Clone`: copy element by element with [`List::push_back_copy`].
///
/// ```
/// use duplex_wrap::{Vector, VectorList};
///
/// let mut list = VectorList::new();
/// let mut v = list.push_back_aliased(Vector::from([1.0, 2.0])).unwrap();
/// v[0] = 5.0;
/// assert_eq!(list.get(0).unwrap().as_slice(), &[5.0, 2.0]);
/// ```
pub struct List<'a, H> {
    storage: Storage<'a, ListHandle<H>>,
}

/// A list of [`Vector`]s.
pub type VectorList<'a, T> = List<'a, VectorHandle<T>>;

/// A list of [`Matrix`]es.
pub type MatrixList<'a, T> = List<'a, MatrixHandle<T>>;

impl<'a, H: Wrap> List<'a, H> {
    /// An empty owning list. Does not allocate.
    pub fn new() -> Self {
        Self::capture(ListHandle::new())
    }

    /// An empty owning list whose slots and elements follow `config`.
    pub fn new_in(config: &RuntimeConfig) -> Self {
        Self::capture(ListHandle::new_in(config))
    }

    /// An owning list of `len` fresh elements.
    pub fn with_len(len: usize) -> Result<Self, ContainerError> {
        Self::with_len_in(&RuntimeConfig::default(), len)
    }

    /// An owning list of `len` fresh elements under `config`.
    pub fn with_len_in(config: &RuntimeConfig, len: usize) -> Result<Self, ContainerError> {
        Ok(Self::capture(ListHandle::init_in(config, len)?))
    }

    /// Adopt `handle`; the list becomes its sole owner.
    pub fn capture(handle: ListHandle<H>) -> Self {
        Self {
            storage: Storage::Owned(handle),
        }
    }

    /// View `handle` without taking ownership.
    pub fn alias(handle: &'a mut ListHandle<H>) -> Self {
        Self {
            storage: Storage::Aliased(handle),
        }
    }

    /// Current ownership mode.
    pub fn mode(&self) -> Mode {
        self.storage.mode()
    }

    /// Whether this list views a handle owned elsewhere.
    pub fn is_alias(&self) -> bool {
        self.mode() == Mode::Aliasing
    }

    /// Whether this list owns its handle.
    pub fn is_owning(&self) -> bool {
        self.mode() == Mode::Owning
    }

    /// Whether the contents were moved out with [`List::take`].
    pub fn is_moved_from(&self) -> bool {
        self.mode() == Mode::MovedFrom
    }

    /// The underlying runtime handle.
    pub fn handle(&self) -> Option<&ListHandle<H>> {
        self.storage.get()
    }

    /// The underlying runtime handle, mutably.
    pub fn handle_mut(&mut self) -> Option<&mut ListHandle<H>> {
        self.storage.get_mut()
    }

    /// Give up ownership of the handle. `None` unless owning.
    pub fn into_handle(self) -> Option<ListHandle<H>> {
        self.storage.into_owned()
    }

    /// Move the contents out, leaving this list moved-from.
    pub fn take(&mut self) -> Self {
        Self {
            storage: self.storage.take(),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.handle().map_or(0, ListHandle::len)
    }

    /// Whether the list has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots available without reallocating.
    pub fn capacity(&self) -> usize {
        self.handle().map_or(0, ListHandle::capacity)
    }

    /// Destroy every element.
    pub fn clear(&mut self) {
        if let Some(h) = self.storage.get_mut() {
            h.clear();
        }
    }

    /// Resize to `len`: shrinking destroys trailing elements, growing
    /// appends fresh ones.
    pub fn resize(&mut self, len: usize) -> Result<(), ContainerError> {
        Ok(self.storage.live_mut()?.resize(len)?)
    }

    /// Ensure room for `capacity` elements. No-op if already sufficient.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), ContainerError> {
        Ok(self.storage.live_mut()?.reserve(capacity)?)
    }

    /// The element handle at `pos`, for reading.
    pub fn get(&self, pos: usize) -> Option<&H> {
        self.handle()?.get(pos)
    }

    /// An aliasing wrapper onto the element at `pos`.
    pub fn get_mut(&mut self, pos: usize) -> Option<H::Wrapper<'_>> {
        self.storage.get_mut()?.get_mut(pos).map(alias_of)
    }

    /// The last element handle, for reading.
    pub fn back(&self) -> Option<&H> {
        self.handle()?.as_slice().last()
    }

    /// An aliasing wrapper onto the last element.
    pub fn back_mut(&mut self) -> Option<H::Wrapper<'_>> {
        self.storage.get_mut()?.tail_ptr().map(alias_of)
    }

    /// Iterate over the element handles.
    pub fn iter(&self) -> std::slice::Iter<'_, H> {
        match self.storage.get() {
            Some(h) => h.as_slice().iter(),
            None => Default::default(),
        }
    }

    /// Iterate over aliasing wrappers onto each element.
    pub fn iter_mut(&mut self) -> IterMut<'_, H> {
        let inner = match self.storage.get_mut() {
            Some(h) => h.as_mut_slice().iter_mut(),
            None => Default::default(),
        };
        IterMut { inner }
    }

    /// Store `value` in slot `pos`, destroying the previous element.
    ///
    /// An owning `value` is moved in; an aliasing one is deep-copied.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= len()`.
    pub fn set<'v>(&mut self, pos: usize, value: H::Wrapper<'v>) -> Result<(), ContainerError>
    where
        H: 'v,
    {
        let list = self.storage.live_mut()?;
        let item = adopt::<H>(value)?;
        list.set(pos, item);
        Ok(())
    }

    /// Like [`List::set`], returning an alias onto the slot so the caller
    /// keeps a live view of what is now list-owned data.
    pub fn set_aliased<'v>(
        &mut self,
        pos: usize,
        value: H::Wrapper<'v>,
    ) -> Result<H::Wrapper<'_>, ContainerError>
    where
        H: 'v,
    {
        let list = self.storage.live_mut()?;
        let item = adopt::<H>(value)?;
        list.set(pos, item);
        Ok(alias_of(&mut list.as_mut_slice()[pos]))
    }

    /// Store a raw handle in slot `pos`, taking ownership of it.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= len()`.
    pub fn set_handle(&mut self, pos: usize, handle: H) -> Result<(), ContainerError> {
        self.storage.live_mut()?.set(pos, handle);
        Ok(())
    }

    /// Append `value`, taking ownership of it.
    ///
    /// An owning `value` is moved in; an aliasing one is deep-copied. On
    /// failure the list is unchanged and `value` is dropped.
    pub fn push_back<'v>(&mut self, value: H::Wrapper<'v>) -> Result<(), ContainerError>
    where
        H: 'v,
    {
        self.append(value)?;
        Ok(())
    }

    /// Like [`List::push_back`], returning an alias onto the new last slot.
    pub fn push_back_aliased<'v>(
        &mut self,
        value: H::Wrapper<'v>,
    ) -> Result<H::Wrapper<'_>, ContainerError>
    where
        H: 'v,
    {
        let tail = self.append(value)?;
        Ok(alias_of(tail))
    }

    fn append<'v>(&mut self, value: H::Wrapper<'v>) -> Result<&mut H, ContainerError>
    where
        H: 'v,
    {
        let list = self.storage.live_mut()?;
        list.reserve_additional(1)?;
        let item = adopt::<H>(value)?;
        list.push_back(item)?;
        let last = list.len() - 1;
        Ok(&mut list.as_mut_slice()[last])
    }

    /// Append a raw handle, taking ownership of it.
    pub fn push_back_handle(&mut self, handle: H) -> Result<(), ContainerError> {
        Ok(self.storage.live_mut()?.push_back(handle)?)
    }

    /// Append a deep copy of `handle`; the caller keeps the original.
    pub fn push_back_copy(&mut self, handle: &H) -> Result<(), ContainerError> {
        Ok(self.storage.live_mut()?.push_back_copy(handle)?)
    }

    /// Append a fresh element and return an alias onto it.
    pub fn push_back_new(&mut self) -> Result<H::Wrapper<'_>, ContainerError> {
        let tail = self.storage.live_mut()?.push_back_new()?;
        Ok(alias_of(tail))
    }

    /// Remove the last element and return it as an owning wrapper.
    pub fn pop_back<'b>(&mut self) -> Option<H::Wrapper<'b>>
    where
        H: 'b,
    {
        self.storage.get_mut()?.pop_back().map(owned_of)
    }

    /// Remove the element at `pos`, shifting later elements down, and
    /// return it as an owning wrapper.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= len()`.
    pub fn remove<'b>(&mut self, pos: usize) -> H::Wrapper<'b>
    where
        H: 'b,
    {
        match self.storage.get_mut() {
            Some(list) => owned_of(list.remove(pos)),
            None => panic!("removal index (is {pos}) should be < len (is 0)"),
        }
    }

    /// Exchange the contents of slots `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn swap_elements(&mut self, a: usize, b: usize) {
        match self.storage.get_mut() {
            Some(list) => list.swap_slots(a, b),
            None => panic!("swap indices ({a}, {b}) out of range for moved-from list"),
        }
    }

    /// Exchange the backing buffers of two lists in O(1).
    ///
    /// Modes are not exchanged.
    pub fn swap(&mut self, other: &mut List<'_, H>) -> Result<(), ContainerError> {
        let mine = self.storage.live_mut()?;
        let theirs = other.storage.live_mut()?;
        mine.swap(theirs);
        Ok(())
    }
}

impl<H: Wrap> Default for List<'_, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'l, H: Wrap> IntoIterator for &'l List<'_, H> {
    type Item = &'l H;
    type IntoIter = std::slice::Iter<'l, H>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<H: Wrap + fmt::Debug> fmt::Debug for List<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("mode", &self.mode())
            .field("items", &self.handle().map(ListHandle::as_slice))
            .finish()
    }
}

/// Iterator over aliasing wrappers onto a list's elements.
///
/// Produced by [`List::iter_mut`].
pub struct IterMut<'l, H> {
    inner: std::slice::IterMut<'l, H>,
}

impl<'l, H: Wrap + 'l> Iterator for IterMut<'l, H> {
    type Item = H::Wrapper<'l>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(alias_of)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'l, H: Wrap + 'l> DoubleEndedIterator for IterMut<'l, H> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(alias_of)
    }
}

impl<'l, H: Wrap + 'l> ExactSizeIterator for IterMut<'l, H> {}
