//! Row-major matrix buffers.
//!
//! A [`MatrixHandle`] is a [`VectorHandle`] plus row and column counts.
//! Element `(i, j)` lives at flat offset `i * ncol + j`.

use std::ops::{Index, IndexMut};

use crate::config::RuntimeConfig;
use crate::element::Element;
use crate::error::RuntimeError;
use crate::vector::VectorHandle;

/// Runtime handle for an `nrow × ncol` row-major grid of `T`.
#[derive(Clone, Debug)]
pub struct MatrixHandle<T> {
    data: VectorHandle<T>,
    nrow: usize,
    ncol: usize,
}

/// `nrow * ncol`, or a capacity error if the product overflows.
fn cell_count(nrow: usize, ncol: usize) -> Result<usize, RuntimeError> {
    nrow.checked_mul(ncol).ok_or(RuntimeError::CapacityExceeded {
        requested: usize::MAX,
        limit: RuntimeConfig::DEFAULT_MAX_ELEMENTS,
    })
}

impl<T: Element> MatrixHandle<T> {
    /// An empty `0 × 0` matrix under `config`. Does not allocate.
    ///
    /// `config` is not validated here; the fallible `init_*` constructors
    /// reject an invalid config.
    pub fn new_in(config: &RuntimeConfig) -> Self {
        Self {
            data: VectorHandle::new_in(config),
            nrow: 0,
            ncol: 0,
        }
    }

    /// A default-filled `nrow × ncol` matrix.
    pub fn init(nrow: usize, ncol: usize) -> Result<Self, RuntimeError> {
        Self::init_in(&RuntimeConfig::default(), nrow, ncol)
    }

    /// A default-filled `nrow × ncol` matrix under `config`.
    pub fn init_in(config: &RuntimeConfig, nrow: usize, ncol: usize) -> Result<Self, RuntimeError> {
        let data = VectorHandle::init_in(config, cell_count(nrow, ncol)?)?;
        Ok(Self { data, nrow, ncol })
    }

    /// A matrix over `values`, which must hold exactly `nrow * ncol`
    /// elements in row-major order.
    pub fn init_array(
        config: &RuntimeConfig,
        nrow: usize,
        ncol: usize,
        values: &[T],
    ) -> Result<Self, RuntimeError> {
        let expected = cell_count(nrow, ncol)?;
        if values.len() != expected {
            return Err(RuntimeError::ShapeMismatch {
                expected,
                found: values.len(),
            });
        }
        let data = VectorHandle::init_array(config, values)?;
        Ok(Self { data, nrow, ncol })
    }

    /// A deep copy with the same shape and limits.
    pub fn init_copy(&self) -> Result<Self, RuntimeError> {
        Ok(Self {
            data: self.data.init_copy()?,
            nrow: self.nrow,
            ncol: self.ncol,
        })
    }

    /// Overwrite shape and contents with a copy of `other`.
    pub fn update(&mut self, other: &Self) -> Result<(), RuntimeError> {
        self.data.update(&other.data)?;
        self.nrow = other.nrow;
        self.ncol = other.ncol;
        Ok(())
    }

    /// Number of rows.
    pub fn nrow(&self) -> usize {
        self.nrow
    }

    /// Number of columns.
    pub fn ncol(&self) -> usize {
        self.ncol
    }

    /// Total number of elements, `nrow * ncol`.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the matrix has no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element capacity of the backing buffer.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Largest element count this handle may ever reach.
    pub fn max_len(&self) -> usize {
        self.data.max_len()
    }

    /// All elements in row-major order.
    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    /// All elements in row-major order, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data.as_mut_slice()
    }

    /// Element `(i, j)`, or `None` when out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        if i < self.nrow && j < self.ncol {
            self.data.as_slice().get(i * self.ncol + j)
        } else {
            None
        }
    }

    /// Element `(i, j)` mutably, or `None` when out of range.
    pub fn get_mut(&mut self, i: usize, j: usize) -> Option<&mut T> {
        if i < self.nrow && j < self.ncol {
            let ncol = self.ncol;
            self.data.as_mut_slice().get_mut(i * ncol + j)
        } else {
            None
        }
    }

    /// Row `i` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `i >= nrow()`.
    pub fn row(&self, i: usize) -> &[T] {
        assert!(i < self.nrow, "row index {i} out of range for {} rows", self.nrow);
        &self.data.as_slice()[i * self.ncol..(i + 1) * self.ncol]
    }

    /// Row `i` as a mutable slice.
    ///
    /// # Panics
    ///
    /// Panics if `i >= nrow()`.
    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        assert!(i < self.nrow, "row index {i} out of range for {} rows", self.nrow);
        let ncol = self.ncol;
        &mut self.data.as_mut_slice()[i * ncol..(i + 1) * ncol]
    }

    /// Reshape to `nrow × ncol`.
    ///
    /// The flat buffer is resized to the new element count (new slots are
    /// default-filled) and the dimensions replaced. Elements are not
    /// remapped, so the flat prefix is preserved.
    pub fn resize(&mut self, nrow: usize, ncol: usize) -> Result<(), RuntimeError> {
        self.data.resize(cell_count(nrow, ncol)?)?;
        self.nrow = nrow;
        self.ncol = ncol;
        Ok(())
    }

    /// Release unused capacity without changing the shape.
    pub fn resize_min(&mut self) {
        self.data.resize_min();
    }

    /// Set every element to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.as_mut_slice().fill(value);
    }

    /// Exchange two matrices in O(1).
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Memory held by the backing storage in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.data.memory_bytes()
    }
}

impl<T: Element> Default for MatrixHandle<T> {
    fn default() -> Self {
        Self::new_in(&RuntimeConfig::default())
    }
}

impl<T: Element> Index<(usize, usize)> for MatrixHandle<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        match self.get(i, j) {
            Some(v) => v,
            None => panic!(
                "matrix index ({i}, {j}) out of range for {}x{}",
                self.nrow, self.ncol
            ),
        }
    }
}

impl<T: Element> IndexMut<(usize, usize)> for MatrixHandle<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        let (nrow, ncol) = (self.nrow, self.ncol);
        match self.get_mut(i, j) {
            Some(v) => v,
            None => panic!("matrix index ({i}, {j}) out of range for {nrow}x{ncol}"),
        }
    }
}
