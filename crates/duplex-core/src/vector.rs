//! Flat growable buffers.
//!
//! A [`VectorHandle`] is the runtime's record for a contiguous buffer of
//! [`Element`]s: live data, one-past-the-last live element, and
//! one-past-allocated-capacity. Every primitive that can grow the buffer
//! returns a [`RuntimeError`] instead of partially applying.

use std::ops::{Index, IndexMut, RangeBounds};

use tracing::trace;

use crate::buffer::Limits;
use crate::config::RuntimeConfig;
use crate::element::Element;
use crate::error::RuntimeError;

/// Runtime handle for a flat buffer of `T`.
#[derive(Clone, Debug)]
pub struct VectorHandle<T> {
    data: Vec<T>,
    limits: Limits,
}

impl<T: Element> VectorHandle<T> {
    /// An empty handle under the default config. Does not allocate.
    pub fn new() -> Self {
        Self::new_in(&RuntimeConfig::default())
    }

    /// An empty handle under `config`. Does not allocate.
    ///
    /// Infallible, so `config` is not validated; the fallible `init_*`
    /// constructors reject an invalid config.
    pub fn new_in(config: &RuntimeConfig) -> Self {
        Self {
            data: Vec::new(),
            limits: Limits::from_config(config),
        }
    }

    /// A handle holding `len` default-valued elements.
    pub fn init(len: usize) -> Result<Self, RuntimeError> {
        Self::init_in(&RuntimeConfig::default(), len)
    }

    /// A handle holding `len` default-valued elements, under `config`.
    pub fn init_in(config: &RuntimeConfig, len: usize) -> Result<Self, RuntimeError> {
        config.validate()?;
        let mut handle = Self::new_in(config);
        handle.resize(len)?;
        trace!(len, "vector handle initialised");
        Ok(handle)
    }

    /// A handle holding a copy of `values`, under `config`.
    pub fn init_array(config: &RuntimeConfig, values: &[T]) -> Result<Self, RuntimeError> {
        config.validate()?;
        let mut handle = Self::new_in(config);
        handle.limits.fit(&mut handle.data, values.len())?;
        handle.data.extend_from_slice(values);
        Ok(handle)
    }

    /// A deep copy of this handle with the same limits.
    ///
    /// Unlike `Clone`, reports allocator refusal instead of aborting.
    pub fn init_copy(&self) -> Result<Self, RuntimeError> {
        let mut data = Vec::new();
        data.try_reserve_exact(self.data.len())
            .map_err(|_| RuntimeError::OutOfMemory {
                requested: self.data.len(),
            })?;
        data.extend_from_slice(&self.data);
        Ok(Self {
            data,
            limits: self.limits,
        })
    }

    /// Overwrite this buffer's contents with a copy of `other`'s.
    ///
    /// Keeps this handle's limits. On failure the contents are unchanged.
    pub fn update(&mut self, other: &Self) -> Result<(), RuntimeError> {
        self.limits.fit(&mut self.data, other.len())?;
        self.data.clear();
        self.data.extend_from_slice(&other.data);
        Ok(())
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds no live elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of elements the buffer can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Largest length this handle may ever reach.
    pub fn max_len(&self) -> usize {
        self.limits.max_elements
    }

    /// The live elements.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The live elements, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Resize to `len`, default-filling new slots or discarding the tail.
    pub fn resize(&mut self, len: usize) -> Result<(), RuntimeError> {
        self.limits.fit(&mut self.data, len)?;
        self.data.resize(len, T::default());
        Ok(())
    }

    /// Ensure room for `capacity` elements. No-op if already sufficient.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), RuntimeError> {
        self.limits.reserve_exact(&mut self.data, capacity)
    }

    /// Release unused capacity.
    pub fn resize_min(&mut self) {
        self.data.shrink_to_fit();
    }

    /// Append one element, growing by the configured policy if full.
    pub fn push_back(&mut self, value: T) -> Result<(), RuntimeError> {
        self.limits.grow(&mut self.data, 1)?;
        self.data.push(value);
        Ok(())
    }

    /// Remove and return the last element, if any.
    pub fn pop_back(&mut self) -> Option<T> {
        self.data.pop()
    }

    /// Overwrite the element at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= len()`.
    pub fn set(&mut self, pos: usize, value: T) {
        self.data[pos] = value;
    }

    /// Remove the element at `pos`, shifting the tail down.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= len()`.
    pub fn remove(&mut self, pos: usize) -> T {
        self.data.remove(pos)
    }

    /// Remove the elements in `range`, shifting the tail down.
    ///
    /// # Panics
    ///
    /// Panics if the range is decreasing, extends past `len()`, or has an
    /// end bound that overflows.
    pub fn remove_section(&mut self, range: impl RangeBounds<usize>) {
        self.data.drain(range);
    }

    /// Drop all live elements. Capacity is kept.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Exchange the buffers (and limits) of two handles in O(1).
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// The last live element.
    pub fn tail_ptr(&mut self) -> Option<&mut T> {
        self.data.last_mut()
    }

    /// Memory held by the backing storage in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.data.capacity() * std::mem::size_of::<T>()
    }
}

impl<T: Element> Default for VectorHandle<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Adopt an existing `Vec` under the default config.
impl<T: Element> From<Vec<T>> for VectorHandle<T> {
    fn from(data: Vec<T>) -> Self {
        Self {
            data,
            limits: Limits::from_config(&RuntimeConfig::default()),
        }
    }
}

impl<T: Element> Index<usize> for VectorHandle<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T: Element> IndexMut<usize> for VectorHandle<T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GrowthPolicy;

    fn tight(limit: usize) -> RuntimeConfig {
        RuntimeConfig::new()
            .with_max_elements(limit)
            .with_growth(GrowthPolicy::Exact)
    }

    #[test]
    fn init_zero_fills() {
        let h = VectorHandle::<f64>::init(4).unwrap();
        assert_eq!(h.as_slice(), &[0.0; 4]);
        assert!(h.capacity() >= 4);
    }

    #[test]
    fn init_past_limit_fails() {
        let result = VectorHandle::<i32>::init_in(&tight(3), 4);
        assert_eq!(
            result.unwrap_err(),
            RuntimeError::CapacityExceeded {
                requested: 4,
                limit: 3
            }
        );
    }

    #[test]
    fn init_rejects_zero_limit_config() {
        let config = RuntimeConfig::new().with_max_elements(0);
        assert!(matches!(
            VectorHandle::<u8>::init_in(&config, 0),
            Err(RuntimeError::InvalidConfig { .. })
        ));
        assert!(matches!(
            VectorHandle::<u8>::init_array(&config, &[]),
            Err(RuntimeError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn allocator_refusal_is_out_of_memory() {
        let mut h = VectorHandle::<u64>::new();
        assert_eq!(
            h.resize(isize::MAX as usize),
            Err(RuntimeError::OutOfMemory {
                requested: isize::MAX as usize
            })
        );
        assert!(h.is_empty());
    }

    #[test]
    fn init_copy_is_independent() {
        let mut a = VectorHandle::init_array(&RuntimeConfig::default(), &[1, 2, 3]).unwrap();
        let b = a.init_copy().unwrap();
        a.set(0, 9);
        assert_eq!(b.as_slice(), &[1, 2, 3]);
        assert_eq!(b.max_len(), a.max_len());
    }

    #[test]
    fn update_copies_contents_and_keeps_limits() {
        let mut dst = VectorHandle::init_array(&tight(8), &[7, 7]).unwrap();
        let src = VectorHandle::from(vec![1, 2, 3, 4]);
        dst.update(&src).unwrap();
        assert_eq!(dst.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(dst.max_len(), 8);
    }

    #[test]
    fn update_past_limit_keeps_old_contents() {
        let mut dst = VectorHandle::init_array(&tight(2), &[7, 7]).unwrap();
        let src = VectorHandle::from(vec![1, 2, 3]);
        assert!(dst.update(&src).is_err());
        assert_eq!(dst.as_slice(), &[7, 7]);
    }

    #[test]
    fn push_back_fails_at_limit_without_change() {
        let mut h = VectorHandle::init_in(&tight(2), 2).unwrap();
        let err = h.push_back(1u8).unwrap_err();
        assert!(err.is_allocation_failure());
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn resize_shrinks_and_grows() {
        let mut h = VectorHandle::from(vec![1, 2, 3, 4]);
        h.resize(2).unwrap();
        assert_eq!(h.as_slice(), &[1, 2]);
        h.resize(4).unwrap();
        assert_eq!(h.as_slice(), &[1, 2, 0, 0]);
    }

    #[test]
    fn remove_and_remove_section_compact() {
        let mut h = VectorHandle::from(vec![1, 2, 3, 4, 5]);
        assert_eq!(h.remove(1), 2);
        assert_eq!(h.as_slice(), &[1, 3, 4, 5]);
        h.remove_section(1..3);
        assert_eq!(h.as_slice(), &[1, 5]);
    }

    #[test]
    fn swap_exchanges_buffers() {
        let mut a = VectorHandle::from(vec![1, 2]);
        let mut b = VectorHandle::init_array(&tight(5), &[3]).unwrap();
        a.swap(&mut b);
        assert_eq!(a.as_slice(), &[3]);
        assert_eq!(a.max_len(), 5);
        assert_eq!(b.as_slice(), &[1, 2]);
    }

    #[test]
    fn zero_sized_reserve_is_noop_but_length_is_capped() {
        let mut h = VectorHandle::<()>::new_in(&tight(3));
        h.reserve(5).unwrap();
        assert!(h.is_empty());
        assert!(h.resize(4).unwrap_err().is_allocation_failure());
        h.resize(3).unwrap();
        assert!(h.push_back(()).unwrap_err().is_allocation_failure());
        assert_eq!(h.len(), 3);
    }

    #[test]
    fn resize_min_releases_capacity() {
        let mut h = VectorHandle::<u16>::new();
        h.reserve(100).unwrap();
        h.push_back(1).unwrap();
        h.resize_min();
        assert!(h.capacity() < 100);
        assert_eq!(h.as_slice(), &[1]);
    }

    #[test]
    fn tail_ptr_points_at_last() {
        let mut h = VectorHandle::from(vec![1, 2, 3]);
        *h.tail_ptr().unwrap() = 30;
        assert_eq!(h[2], 30);
        assert!(VectorHandle::<i32>::new().tail_ptr().is_none());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn reserve_never_changes_contents(
                values in proptest::collection::vec(any::<i32>(), 0..64),
                extra in 0usize..64,
            ) {
                let mut h = VectorHandle::from(values.clone());
                let cap = h.capacity();
                h.reserve(cap.saturating_sub(extra)).unwrap();
                prop_assert_eq!(h.capacity(), cap);
                h.reserve(values.len() + extra).unwrap();
                prop_assert_eq!(h.as_slice(), values.as_slice());
            }

            #[test]
            fn failed_push_leaves_handle_intact(
                values in proptest::collection::vec(any::<u8>(), 1..16),
            ) {
                let config = tight(values.len());
                let mut h = VectorHandle::init_array(&config, &values).unwrap();
                prop_assert!(h.push_back(0).is_err());
                prop_assert_eq!(h.as_slice(), values.as_slice());
            }
        }
    }
}
