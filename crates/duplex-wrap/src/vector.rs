//! Owning/aliasing wrapper over a flat runtime buffer.

use std::fmt;
use std::ops::{Deref, DerefMut, RangeBounds};

use duplex_core::{Element, RuntimeConfig, VectorHandle};

use crate::error::ContainerError;
use crate::storage::{Mode, Storage};

/// A growable sequence of `T` that either owns its [`VectorHandle`] or
/// aliases one owned elsewhere.
///
/// Dereferences to `[T]`, so indexing, iteration and the slice algorithms
/// all work directly. Indexing is bounds-checked and panics out of range.
///
/// ```
/// use duplex_wrap::Vector;
///
/// let mut v = Vector::from([1.0, 2.0, 3.0]);
/// v.erase(1);
/// assert_eq!(v, [1.0, 3.0]);
/// assert!(v.is_owning());
/// ```
pub struct Vector<'a, T> {
    storage: Storage<'a, VectorHandle<T>>,
}

impl<'a, T: Element> Vector<'a, T> {
    /// An empty owning vector. Does not allocate.
    pub fn new() -> Self {
        Self::capture(VectorHandle::new())
    }

    /// An empty owning vector whose buffer follows `config`.
    pub fn new_in(config: &RuntimeConfig) -> Self {
        Self::capture(VectorHandle::new_in(config))
    }

    /// An owning vector of `len` default values.
    pub fn with_len(len: usize) -> Result<Self, ContainerError> {
        Self::with_len_in(&RuntimeConfig::default(), len)
    }

    /// An owning vector of `len` default values under `config`.
    pub fn with_len_in(config: &RuntimeConfig, len: usize) -> Result<Self, ContainerError> {
        Ok(Self::capture(VectorHandle::init_in(config, len)?))
    }

    /// An owning vector holding a copy of `values`.
    pub fn from_slice(values: &[T]) -> Result<Self, ContainerError> {
        Self::from_slice_in(&RuntimeConfig::default(), values)
    }

    /// An owning vector holding a copy of `values` under `config`.
    pub fn from_slice_in(config: &RuntimeConfig, values: &[T]) -> Result<Self, ContainerError> {
        Ok(Self::capture(VectorHandle::init_array(config, values)?))
    }

    /// Adopt `handle`; the vector becomes its sole owner.
    pub fn capture(handle: VectorHandle<T>) -> Self {
        Self {
            storage: Storage::Owned(handle),
        }
    }

    /// View `handle` without taking ownership.
    pub fn alias(handle: &'a mut VectorHandle<T>) -> Self {
        Self {
            storage: Storage::Aliased(handle),
        }
    }

    /// Current ownership mode.
    pub fn mode(&self) -> Mode {
        self.storage.mode()
    }

    /// Whether this vector views a handle owned elsewhere.
    pub fn is_alias(&self) -> bool {
        self.mode() == Mode::Aliasing
    }

    /// Whether this vector owns its handle.
    pub fn is_owning(&self) -> bool {
        self.mode() == Mode::Owning
    }

    /// Whether the contents were moved out with [`Vector::take`].
    pub fn is_moved_from(&self) -> bool {
        self.mode() == Mode::MovedFrom
    }

    /// The underlying runtime handle.
    pub fn handle(&self) -> Option<&VectorHandle<T>> {
        self.storage.get()
    }

    /// The underlying runtime handle, mutably.
    pub fn handle_mut(&mut self) -> Option<&mut VectorHandle<T>> {
        self.storage.get_mut()
    }

    /// Give up ownership of the handle. `None` unless owning.
    pub fn into_handle(self) -> Option<VectorHandle<T>> {
        self.storage.into_owned()
    }

    /// Move the contents out, leaving this vector moved-from.
    ///
    /// The returned vector has the mode this one had. A moved-from vector
    /// reads as empty and refuses to allocate until it is assigned again.
    pub fn take(&mut self) -> Self {
        Self {
            storage: self.storage.take(),
        }
    }

    /// An owning deep copy, reporting allocation failure.
    pub fn try_clone<'b>(&self) -> Result<Vector<'b, T>, ContainerError> {
        match self.handle() {
            Some(h) => Ok(Vector::capture(h.init_copy()?)),
            None => Ok(Vector::new()),
        }
    }

    /// Overwrite the contents with a copy of `other`'s, keeping this
    /// vector's mode. A moved-from vector becomes owning.
    pub fn assign_from(&mut self, other: &Vector<'_, T>) -> Result<(), ContainerError> {
        if self.storage.same_handle(&other.storage) {
            return Ok(());
        }
        let src = other.handle();
        if let Some(dst) = self.storage.get_mut() {
            match src {
                Some(src) => dst.update(src)?,
                None => dst.clear(),
            }
            return Ok(());
        }
        self.storage = Storage::Owned(match src {
            Some(src) => src.init_copy()?,
            None => VectorHandle::new(),
        });
        Ok(())
    }

    /// The elements as a slice. Empty when moved-from.
    pub fn as_slice(&self) -> &[T] {
        match self.storage.get() {
            Some(h) => h.as_slice(),
            None => &[],
        }
    }

    /// The elements as a mutable slice. Empty when moved-from.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match self.storage.get_mut() {
            Some(h) => h.as_mut_slice(),
            None => &mut [],
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Whether there are no elements.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Number of elements storable without reallocating.
    pub fn capacity(&self) -> usize {
        self.handle().map_or(0, VectorHandle::capacity)
    }

    /// Largest length the buffer may grow to.
    pub fn max_size(&self) -> usize {
        self.handle().map_or(0, VectorHandle::max_len)
    }

    /// The last element.
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// The last element, mutably.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Remove every element. Capacity is kept.
    pub fn clear(&mut self) {
        if let Some(h) = self.storage.get_mut() {
            h.clear();
        }
    }

    /// Resize to `len`, default-filling new slots or dropping the tail.
    pub fn resize(&mut self, len: usize) -> Result<(), ContainerError> {
        Ok(self.storage.live_mut()?.resize(len)?)
    }

    /// Ensure room for `capacity` elements. No-op if already sufficient.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), ContainerError> {
        Ok(self.storage.live_mut()?.reserve(capacity)?)
    }

    /// Release unused capacity.
    pub fn shrink_to_fit(&mut self) {
        if let Some(h) = self.storage.get_mut() {
            h.resize_min();
        }
    }

    /// Append `value`.
    pub fn push_back(&mut self, value: T) -> Result<(), ContainerError> {
        Ok(self.storage.live_mut()?.push_back(value)?)
    }

    /// Remove and return the last element.
    pub fn pop_back(&mut self) -> Option<T> {
        self.storage.get_mut()?.pop_back()
    }

    /// Remove the element at `pos`, shifting later elements down.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= len()`.
    pub fn erase(&mut self, pos: usize) -> T {
        match self.storage.get_mut() {
            Some(h) => h.remove(pos),
            None => panic!("erase index (is {pos}) should be < len (is 0)"),
        }
    }

    /// Remove the elements in `range`, shifting later elements down.
    ///
    /// # Panics
    ///
    /// Panics if the range is decreasing, extends past `len()`, or has an
    /// end bound that overflows.
    pub fn erase_range(&mut self, range: impl RangeBounds<usize>) {
        match self.storage.get_mut() {
            Some(h) => h.remove_section(range),
            // Moved-from reads as empty: only empty ranges at 0 are valid.
            None => {
                Vec::<T>::new().drain(range);
            }
        }
    }

    /// Exchange the buffers of two vectors in O(1).
    ///
    /// Modes are not exchanged: swapping through an alias swaps the
    /// aliased handle's contents.
    pub fn swap(&mut self, other: &mut Vector<'_, T>) -> Result<(), ContainerError> {
        let mine = self.storage.live_mut()?;
        let theirs = other.storage.live_mut()?;
        mine.swap(theirs);
        Ok(())
    }
}

impl<T: Element> Default for Vector<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Always produces an owning vector, whatever the source's mode.
impl<T: Element> Clone for Vector<'_, T> {
    fn clone(&self) -> Self {
        match self.handle() {
            Some(h) => Self::capture(h.clone()),
            None => Self::new(),
        }
    }
}

impl<T: Element> Deref for Vector<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Element> DerefMut for Vector<'_, T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Element> AsRef<[T]> for Vector<'_, T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Element> From<Vec<T>> for Vector<'_, T> {
    fn from(values: Vec<T>) -> Self {
        Self::capture(VectorHandle::from(values))
    }
}

impl<T: Element, const N: usize> From<[T; N]> for Vector<'_, T> {
    fn from(values: [T; N]) -> Self {
        Self::from(Vec::from(values))
    }
}

impl<T: Element> FromIterator<T> for Vector<'_, T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<'v, T: Element> IntoIterator for &'v Vector<'_, T> {
    type Item = &'v T;
    type IntoIter = std::slice::Iter<'v, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'v, T: Element> IntoIterator for &'v mut Vector<'_, T> {
    type Item = &'v mut T;
    type IntoIter = std::slice::IterMut<'v, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<'a, T> From<Storage<'a, VectorHandle<T>>> for Vector<'a, T> {
    fn from(storage: Storage<'a, VectorHandle<T>>) -> Self {
        Self { storage }
    }
}

impl<'a, T> From<Vector<'a, T>> for Storage<'a, VectorHandle<T>> {
    fn from(vector: Vector<'a, T>) -> Self {
        vector.storage
    }
}

/// Identity first, then length and elementwise comparison.
impl<T: Element> PartialEq<Vector<'_, T>> for Vector<'_, T> {
    fn eq(&self, other: &Vector<'_, T>) -> bool {
        self.storage.same_handle(&other.storage) || self.as_slice() == other.as_slice()
    }
}

impl<T: Element, const N: usize> PartialEq<[T; N]> for Vector<'_, T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Element> PartialEq<[T]> for Vector<'_, T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: Element> fmt::Debug for Vector<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("mode", &self.mode())
            .field("data", &self.as_slice())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duplex_core::{GrowthPolicy, RuntimeError};

    fn tight(limit: usize) -> RuntimeConfig {
        RuntimeConfig::new()
            .with_max_elements(limit)
            .with_growth(GrowthPolicy::Exact)
    }

    #[test]
    fn constructors_produce_owning_vectors() {
        assert!(Vector::<f64>::new().is_owning());
        assert!(Vector::<f64>::with_len(3).unwrap().is_owning());
        assert!(Vector::from_slice(&[1u8]).unwrap().is_owning());
        assert_eq!(Vector::<i32>::with_len(3).unwrap(), [0, 0, 0]);
    }

    #[test]
    fn alias_is_aliasing_and_writes_through() {
        let mut handle = VectorHandle::from(vec![1, 2, 3]);
        {
            let mut v = Vector::alias(&mut handle);
            assert!(v.is_alias());
            v[0] = 10;
            v.push_back(4).unwrap();
        }
        assert_eq!(handle.as_slice(), &[10, 2, 3, 4]);
    }

    #[test]
    fn dropping_an_alias_keeps_the_owner_alive() {
        let mut handle = VectorHandle::from(vec![1.5]);
        drop(Vector::alias(&mut handle));
        assert_eq!(handle.as_slice(), &[1.5]);
    }

    #[test]
    fn take_moves_contents_and_leaves_empty() {
        let mut a = Vector::from([1, 2, 3]);
        let b = a.take();
        assert_eq!(b, [1, 2, 3]);
        assert!(b.is_owning());
        assert!(a.is_moved_from());
        assert_eq!(a.len(), 0);
        assert_eq!(a.capacity(), 0);
    }

    #[test]
    fn take_of_alias_stays_alias() {
        let mut handle = VectorHandle::from(vec![7]);
        let mut a = Vector::alias(&mut handle);
        let b = a.take();
        assert!(b.is_alias());
        assert!(a.is_moved_from());
        assert_eq!(b, [7]);
    }

    #[test]
    fn moved_from_refuses_to_allocate() {
        let mut a = Vector::from([1]);
        let _b = a.take();
        assert_eq!(a.push_back(2), Err(ContainerError::moved_from()));
        assert_eq!(a.resize(4), Err(ContainerError::moved_from()));
        assert_eq!(a.pop_back(), None);
        a.clear();
        a.shrink_to_fit();
        a.erase_range(..);
    }

    #[test]
    fn assignment_revives_moved_from() {
        let mut a = Vector::from([1]);
        let _b = a.take();
        a = Vector::from([5, 6]);
        assert!(a.is_owning());
        assert_eq!(a, [5, 6]);
    }

    #[test]
    fn clone_is_deep_and_owning() {
        let mut handle = VectorHandle::from(vec![1.0, 2.0]);
        let alias = Vector::alias(&mut handle);
        let mut copy = alias.clone();
        assert!(copy.is_owning());
        copy[0] = 9.0;
        assert_eq!(alias, [1.0, 2.0]);
    }

    #[test]
    fn assign_from_keeps_alias_mode() {
        let mut handle = VectorHandle::from(vec![0, 0]);
        let src = Vector::from([4, 5, 6]);
        {
            let mut dst = Vector::alias(&mut handle);
            dst.assign_from(&src).unwrap();
            assert!(dst.is_alias());
        }
        assert_eq!(handle.as_slice(), &[4, 5, 6]);
    }

    #[test]
    fn assign_from_into_moved_from_becomes_owning() {
        let mut dst = Vector::from([1]);
        let _gone = dst.take();
        dst.assign_from(&Vector::from([2, 3])).unwrap();
        assert!(dst.is_owning());
        assert_eq!(dst, [2, 3]);
    }

    #[test]
    fn erase_single_and_range() {
        let mut v = Vector::from([1.0, 2.0, 3.0]);
        assert_eq!(v.erase(1), 2.0);
        assert_eq!(v.len(), 2);
        assert_eq!(v, Vector::from([1.0, 3.0]));

        let mut w = Vector::from([1, 2, 3, 4, 5, 6]);
        w.erase_range(1..=2);
        assert_eq!(w, [1, 4, 5, 6]);
        w.erase_range(2..);
        assert_eq!(w, [1, 4]);
    }

    #[test]
    #[should_panic(expected = "should be < len")]
    fn erase_on_moved_from_panics() {
        let mut v = Vector::from([1]);
        let _moved = v.take();
        v.erase(0);
    }

    #[test]
    #[should_panic]
    fn erase_range_with_overflowing_end_panics() {
        let mut v = Vector::from([1, 2, 3]);
        v.erase_range(0..=usize::MAX);
    }

    #[test]
    #[should_panic]
    fn erase_range_past_len_panics() {
        let mut v = Vector::from([1, 2, 3]);
        v.erase_range(1..4);
    }

    #[test]
    #[should_panic]
    fn erase_range_on_moved_from_panics_when_non_empty() {
        let mut v = Vector::from([1, 2]);
        let _moved = v.take();
        v.erase_range(0..1);
    }

    #[test]
    fn resize_grow_and_shrink() {
        let mut v = Vector::from([1, 2]);
        v.resize(4).unwrap();
        assert_eq!(v, [1, 2, 0, 0]);
        v.resize(1).unwrap();
        assert_eq!(v, [1]);
    }

    #[test]
    fn failed_growth_is_strong() {
        let mut v = Vector::from_slice_in(&tight(3), &[1, 2, 3]).unwrap();
        let cap = v.capacity();
        assert!(v.push_back(4).unwrap_err().is_allocation_failure());
        assert!(v.resize(5).unwrap_err().is_allocation_failure());
        assert!(v.reserve(10).unwrap_err().is_allocation_failure());
        assert_eq!(v, [1, 2, 3]);
        assert_eq!(v.capacity(), cap);
    }

    #[test]
    fn with_len_past_limit_fails() {
        let err = Vector::<u8>::with_len_in(&tight(2), 3).unwrap_err();
        assert!(err.is_allocation_failure());
    }

    #[test]
    fn allocator_refusal_is_reported_as_allocation_failure() {
        let result = Vector::<u64>::with_len(isize::MAX as usize);
        assert!(matches!(
            result,
            Err(ContainerError::AllocationFailed {
                source: RuntimeError::OutOfMemory { .. }
            })
        ));
    }

    #[test]
    fn zero_limit_config_is_a_precondition_violation() {
        let config = RuntimeConfig::new().with_max_elements(0);
        assert!(matches!(
            Vector::<u8>::with_len_in(&config, 0),
            Err(ContainerError::PreconditionViolation { .. })
        ));
    }

    #[test]
    fn zero_sized_reserve_within_capacity_is_noop() {
        let mut v = Vector::<()>::new_in(&tight(3));
        v.reserve(5).unwrap();
        v.resize(3).unwrap();
        assert!(v.push_back(()).unwrap_err().is_allocation_failure());
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn reserve_below_capacity_is_noop() {
        let mut v = Vector::from([1, 2, 3]);
        v.reserve(16).unwrap();
        let cap = v.capacity();
        v.reserve(2).unwrap();
        assert_eq!(v.capacity(), cap);
        assert_eq!(v, [1, 2, 3]);
    }

    #[test]
    fn swap_between_owner_and_alias() {
        let mut handle = VectorHandle::from(vec![1, 1, 1]);
        let mut owned = Vector::from([2]);
        {
            let mut alias = Vector::alias(&mut handle);
            owned.swap(&mut alias).unwrap();
            assert!(alias.is_alias());
            assert_eq!(alias, [2]);
        }
        assert!(owned.is_owning());
        assert_eq!(owned, [1, 1, 1]);
        assert_eq!(handle.as_slice(), &[2]);
    }

    #[test]
    fn swap_with_moved_from_is_rejected() {
        let mut a = Vector::from([1]);
        let mut b = Vector::from([2]);
        let _gone = b.take();
        assert!(a.swap(&mut b).is_err());
        assert_eq!(a, [1]);
    }

    #[test]
    fn equality_ignores_identity_but_not_length() {
        let a = Vector::from([1, 2, 3]);
        let b: Vector<'_, i32> = (1..=3).collect();
        assert_eq!(a, b);
        assert_ne!(a, Vector::from([1, 2]));
        assert_eq!(a, a);
    }

    #[test]
    fn back_and_pop_back() {
        let mut v = Vector::from([1, 2]);
        *v.back_mut().unwrap() = 5;
        assert_eq!(v.back(), Some(&5));
        assert_eq!(v.pop_back(), Some(5));
        assert_eq!(v.pop_back(), Some(1));
        assert_eq!(v.pop_back(), None);
    }

    #[test]
    fn into_handle_only_for_owners() {
        let v = Vector::from([3]);
        assert_eq!(v.into_handle().unwrap().as_slice(), &[3]);
        let mut handle = VectorHandle::from(vec![4]);
        assert!(Vector::alias(&mut handle).into_handle().is_none());
    }

    #[test]
    fn slice_algorithms_work_through_deref() {
        let mut v = Vector::from([3, 1, 2]);
        v.sort_unstable();
        assert_eq!(v, [1, 2, 3]);
        assert_eq!(v.iter().sum::<i32>(), 6);
        for x in &mut v {
            *x *= 2;
        }
        assert_eq!(v, [2, 4, 6]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn copy_then_mutate_leaves_source(
                values in proptest::collection::vec(any::<i64>(), 1..32),
                x in any::<i64>(),
            ) {
                let a = Vector::from(values.clone());
                let mut b = a.clone();
                b[0] = x;
                prop_assert_eq!(a.as_slice(), values.as_slice());
            }

            #[test]
            fn take_then_read(values in proptest::collection::vec(any::<u16>(), 0..32)) {
                let mut a = Vector::from(values.clone());
                let b = a.take();
                prop_assert_eq!(b.as_slice(), values.as_slice());
                prop_assert_eq!(a.len(), 0);
            }

            #[test]
            fn erase_range_matches_vec_drain(
                values in proptest::collection::vec(any::<u8>(), 0..32),
                a in 0usize..32,
                b in 0usize..32,
            ) {
                let (lo, hi) = (a.min(b).min(values.len()), a.max(b).min(values.len()));
                let mut expected = values.clone();
                expected.drain(lo..hi);
                let mut v = Vector::from(values);
                v.erase_range(lo..hi);
                prop_assert_eq!(v.as_slice(), expected.as_slice());
            }
        }
    }
}
