//! Lists of nested handles.
//!
//! A [`ListHandle`] is a growable buffer whose slots are themselves runtime
//! handles. The list owns every slot: elements appended with
//! [`ListHandle::push_back`] or stored with [`ListHandle::set`] are moved
//! in, and [`ListHandle::pop_back`] / [`ListHandle::remove`] move them out
//! again without destroying them.

use tracing::{debug, trace};

use crate::buffer::Limits;
use crate::config::RuntimeConfig;
use crate::error::RuntimeError;
use crate::slot::Slot;

/// Runtime handle for a list of `H` handles.
///
/// Not `Clone`: copying a list means copying every nested buffer, which
/// callers do element by element with [`ListHandle::push_back_copy`].
#[derive(Debug)]
pub struct ListHandle<H> {
    items: Vec<H>,
    /// Config used to create fresh elements; its limit also caps the slot count.
    config: RuntimeConfig,
}

impl<H: Slot> ListHandle<H> {
    /// An empty list under the default config. Does not allocate.
    pub fn new() -> Self {
        Self::new_in(&RuntimeConfig::default())
    }

    /// An empty list under `config`. Does not allocate.
    ///
    /// `config` is not validated here; [`ListHandle::init_in`] does.
    pub fn new_in(config: &RuntimeConfig) -> Self {
        Self {
            items: Vec::new(),
            config: config.clone(),
        }
    }

    /// A list of `len` freshly initialised elements.
    pub fn init(len: usize) -> Result<Self, RuntimeError> {
        Self::init_in(&RuntimeConfig::default(), len)
    }

    /// A list of `len` freshly initialised elements under `config`.
    pub fn init_in(config: &RuntimeConfig, len: usize) -> Result<Self, RuntimeError> {
        config.validate()?;
        let mut list = Self::new_in(config);
        list.resize(len)?;
        Ok(list)
    }

    fn limits(&self) -> Limits {
        Limits::from_config(&self.config)
    }

    /// The config elements are created with.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Number of slots in use.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no slots in use.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of slots available without reallocating.
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// The element handles.
    pub fn as_slice(&self) -> &[H] {
        &self.items
    }

    /// The element handles, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [H] {
        &mut self.items
    }

    /// The handle in slot `pos`.
    pub fn get(&self, pos: usize) -> Option<&H> {
        self.items.get(pos)
    }

    /// The handle in slot `pos`, mutably.
    pub fn get_mut(&mut self, pos: usize) -> Option<&mut H> {
        self.items.get_mut(pos)
    }

    /// Destroy every element. Capacity is kept.
    pub fn clear(&mut self) {
        trace!(len = self.items.len(), "clearing list");
        self.items.clear();
    }

    /// Ensure room for `capacity` slots. No-op if already sufficient.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), RuntimeError> {
        let limits = self.limits();
        limits.reserve_exact(&mut self.items, capacity)
    }

    /// Ensure room for `additional` more slots, growing by policy.
    pub fn reserve_additional(&mut self, additional: usize) -> Result<(), RuntimeError> {
        let limits = self.limits();
        limits.grow(&mut self.items, additional)
    }

    /// Resize to `len` slots.
    ///
    /// Shrinking destroys the trailing elements. Growing creates fresh
    /// elements; they are all built before any is appended, so a failure
    /// leaves the list unchanged.
    pub fn resize(&mut self, len: usize) -> Result<(), RuntimeError> {
        if len <= self.items.len() {
            self.items.truncate(len);
            return Ok(());
        }
        self.limits().fit(&mut self.items, len)?;
        let mut fresh = Vec::new();
        fresh
            .try_reserve_exact(len - self.items.len())
            .map_err(|_| RuntimeError::OutOfMemory { requested: len })?;
        for _ in self.items.len()..len {
            fresh.push(H::init_default(&self.config)?);
        }
        self.items.append(&mut fresh);
        Ok(())
    }

    /// Append `item`, taking ownership of it.
    pub fn push_back(&mut self, item: H) -> Result<(), RuntimeError> {
        self.reserve_additional(1)?;
        self.items.push(item);
        debug!(len = self.items.len(), "list took ownership of appended element");
        Ok(())
    }

    /// Append a deep copy of `item`. The caller keeps `item`.
    pub fn push_back_copy(&mut self, item: &H) -> Result<(), RuntimeError> {
        self.reserve_additional(1)?;
        let copy = item.init_copy()?;
        self.items.push(copy);
        Ok(())
    }

    /// Append a freshly initialised element and return it.
    pub fn push_back_new(&mut self) -> Result<&mut H, RuntimeError> {
        self.reserve_additional(1)?;
        let item = H::init_default(&self.config)?;
        self.items.push(item);
        let last = self.items.len() - 1;
        Ok(&mut self.items[last])
    }

    /// Remove the last element and hand its ownership to the caller.
    pub fn pop_back(&mut self) -> Option<H> {
        let item = self.items.pop()?;
        debug!(len = self.items.len(), "list released ownership of tail element");
        Some(item)
    }

    /// Store `item` in slot `pos`, destroying the previous occupant.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= len()`.
    pub fn set(&mut self, pos: usize, item: H) {
        self.items[pos] = item;
        debug!(pos, "list took ownership of element");
    }

    /// Remove slot `pos`, shifting later slots down, and hand the element
    /// to the caller.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= len()`.
    pub fn remove(&mut self, pos: usize) -> H {
        let item = self.items.remove(pos);
        debug!(pos, len = self.items.len(), "list released ownership of element");
        item
    }

    /// Exchange the contents of slots `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn swap_slots(&mut self, a: usize, b: usize) {
        self.items.swap(a, b);
    }

    /// The last element.
    pub fn tail_ptr(&mut self) -> Option<&mut H> {
        self.items.last_mut()
    }

    /// Exchange the backing buffers of two lists in O(1).
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }
}

impl<H: Slot> Default for ListHandle<H> {
    fn default() -> Self {
        Self::new()
    }
}
