//! Owning/aliasing wrapper over a row-major runtime matrix.

use std::fmt;
use std::ops::{Index, IndexMut};

use duplex_core::{Element, MatrixHandle, RuntimeConfig};

use crate::error::ContainerError;
use crate::storage::{Mode, Storage};

/// An `nrow × ncol` row-major grid of `T` that either owns its
/// [`MatrixHandle`] or aliases one owned elsewhere.
///
/// `m[(i, j)]` addresses row `i`, column `j`; `m[k]` addresses the flat
/// row-major buffer. Both are bounds-checked.
///
/// ```
/// use duplex_wrap::Matrix;
///
/// let m = Matrix::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();
/// assert_eq!(m[(1, 2)], 6);
/// assert_eq!(m[3], 4);
/// ```
pub struct Matrix<'a, T> {
    storage: Storage<'a, MatrixHandle<T>>,
}

impl<'a, T: Element> Matrix<'a, T> {
    /// An empty `0 × 0` owning matrix. Does not allocate.
    pub fn new() -> Self {
        Self::capture(MatrixHandle::default())
    }

    /// An empty `0 × 0` owning matrix whose buffer follows `config`.
    pub fn new_in(config: &RuntimeConfig) -> Self {
        Self::capture(MatrixHandle::new_in(config))
    }

    /// A default-filled `nrow × ncol` owning matrix.
    pub fn with_dims(nrow: usize, ncol: usize) -> Result<Self, ContainerError> {
        Self::with_dims_in(&RuntimeConfig::default(), nrow, ncol)
    }

    /// A default-filled `nrow × ncol` owning matrix under `config`.
    pub fn with_dims_in(
        config: &RuntimeConfig,
        nrow: usize,
        ncol: usize,
    ) -> Result<Self, ContainerError> {
        Ok(Self::capture(MatrixHandle::init_in(config, nrow, ncol)?))
    }

    /// A matrix built from a list of rows, which must all have the same
    /// length.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self, ContainerError> {
        Self::from_rows_in(&RuntimeConfig::default(), rows)
    }

    /// A matrix built from a list of rows under `config`.
    pub fn from_rows_in<R: AsRef<[T]>>(
        config: &RuntimeConfig,
        rows: &[R],
    ) -> Result<Self, ContainerError> {
        let nrow = rows.len();
        let ncol = rows.first().map_or(0, |r| r.as_ref().len());
        let mut values = Vec::new();
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != ncol {
                return Err(ContainerError::PreconditionViolation {
                    reason: format!("row {i} has {} elements, expected {ncol}", row.len()),
                });
            }
            values.extend_from_slice(row);
        }
        Ok(Self::capture(MatrixHandle::init_array(
            config, nrow, ncol, &values,
        )?))
    }

    /// Adopt `handle`; the matrix becomes its sole owner.
    pub fn capture(handle: MatrixHandle<T>) -> Self {
        Self {
            storage: Storage::Owned(handle),
        }
    }

    /// View `handle` without taking ownership.
    pub fn alias(handle: &'a mut MatrixHandle<T>) -> Self {
        Self {
            storage: Storage::Aliased(handle),
        }
    }

    /// Current ownership mode.
    pub fn mode(&self) -> Mode {
        self.storage.mode()
    }

    /// Whether this matrix views a handle owned elsewhere.
    pub fn is_alias(&self) -> bool {
        self.mode() == Mode::Aliasing
    }

    /// Whether this matrix owns its handle.
    pub fn is_owning(&self) -> bool {
        self.mode() == Mode::Owning
    }

    /// Whether the contents were moved out with [`Matrix::take`].
    pub fn is_moved_from(&self) -> bool {
        self.mode() == Mode::MovedFrom
    }

    /// The underlying runtime handle.
    pub fn handle(&self) -> Option<&MatrixHandle<T>> {
        self.storage.get()
    }

    /// The underlying runtime handle, mutably.
    pub fn handle_mut(&mut self) -> Option<&mut MatrixHandle<T>> {
        self.storage.get_mut()
    }

    /// Give up ownership of the handle. `None` unless owning.
    pub fn into_handle(self) -> Option<MatrixHandle<T>> {
        self.storage.into_owned()
    }

    /// Move the contents out, leaving this matrix moved-from (`0 × 0`).
    pub fn take(&mut self) -> Self {
        Self {
            storage: self.storage.take(),
        }
    }

    /// An owning deep copy, reporting allocation failure.
    pub fn try_clone<'b>(&self) -> Result<Matrix<'b, T>, ContainerError> {
        match self.handle() {
            Some(h) => Ok(Matrix::capture(h.init_copy()?)),
            None => Ok(Matrix::new()),
        }
    }

    /// Overwrite shape and contents with a copy of `other`'s, keeping this
    /// matrix's mode. A moved-from matrix becomes owning.
    pub fn assign_from(&mut self, other: &Matrix<'_, T>) -> Result<(), ContainerError> {
        if self.storage.same_handle(&other.storage) {
            return Ok(());
        }
        let src = other.handle();
        if let Some(dst) = self.storage.get_mut() {
            match src {
                Some(src) => dst.update(src)?,
                None => dst.resize(0, 0)?,
            }
            return Ok(());
        }
        self.storage = Storage::Owned(match src {
            Some(src) => src.init_copy()?,
            None => MatrixHandle::default(),
        });
        Ok(())
    }

    /// Number of rows.
    pub fn nrow(&self) -> usize {
        self.handle().map_or(0, MatrixHandle::nrow)
    }

    /// Number of columns.
    pub fn ncol(&self) -> usize {
        self.handle().map_or(0, MatrixHandle::ncol)
    }

    /// Total number of elements, `nrow * ncol`.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Whether the matrix has no elements.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Element capacity of the backing buffer.
    pub fn capacity(&self) -> usize {
        self.handle().map_or(0, MatrixHandle::capacity)
    }

    /// Largest element count the buffer may grow to.
    pub fn max_size(&self) -> usize {
        self.handle().map_or(0, MatrixHandle::max_len)
    }

    /// All elements in row-major order.
    pub fn as_slice(&self) -> &[T] {
        match self.storage.get() {
            Some(h) => h.as_slice(),
            None => &[],
        }
    }

    /// All elements in row-major order, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match self.storage.get_mut() {
            Some(h) => h.as_mut_slice(),
            None => &mut [],
        }
    }

    /// Element `(i, j)`, or `None` when out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        self.handle()?.get(i, j)
    }

    /// Element `(i, j)` mutably, or `None` when out of range.
    pub fn get_mut(&mut self, i: usize, j: usize) -> Option<&mut T> {
        self.handle_mut()?.get_mut(i, j)
    }

    /// Row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= nrow()`.
    pub fn row(&self, i: usize) -> &[T] {
        match self.handle() {
            Some(h) => h.row(i),
            None => panic!("row index {i} out of range for 0 rows"),
        }
    }

    /// Row `i`, mutably.
    ///
    /// # Panics
    ///
    /// Panics if `i >= nrow()`.
    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        match self.handle_mut() {
            Some(h) => h.row_mut(i),
            None => panic!("row index {i} out of range for 0 rows"),
        }
    }

    /// Iterate over the rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.nrow()).map(move |i| self.row(i))
    }

    /// Reshape to `nrow × ncol` using the runtime's resize: the flat
    /// buffer is resized and the dimensions replaced, so the row-major
    /// prefix is preserved and new slots are default-filled.
    pub fn resize(&mut self, nrow: usize, ncol: usize) -> Result<(), ContainerError> {
        Ok(self.storage.live_mut()?.resize(nrow, ncol)?)
    }

    /// Release unused capacity without changing the shape.
    pub fn shrink_to_fit(&mut self) {
        if let Some(h) = self.storage.get_mut() {
            h.resize_min();
        }
    }

    /// Set every element to `value`.
    pub fn fill(&mut self, value: T) {
        self.as_mut_slice().fill(value);
    }

    /// Equality that also requires the same `nrow` and `ncol`.
    pub fn same_shape_eq(&self, other: &Matrix<'_, T>) -> bool {
        self.nrow() == other.nrow() && self.ncol() == other.ncol() && self == other
    }

    /// Exchange the buffers and shapes of two matrices in O(1).
    ///
    /// Modes are not exchanged.
    pub fn swap(&mut self, other: &mut Matrix<'_, T>) -> Result<(), ContainerError> {
        let mine = self.storage.live_mut()?;
        let theirs = other.storage.live_mut()?;
        mine.swap(theirs);
        Ok(())
    }
}

impl<T: Element> Default for Matrix<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Always produces an owning matrix, whatever the source's mode.
impl<T: Element> Clone for Matrix<'_, T> {
    fn clone(&self) -> Self {
        match self.handle() {
            Some(h) => Self::capture(h.clone()),
            None => Self::new(),
        }
    }
}

impl<T: Element> Index<(usize, usize)> for Matrix<'_, T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        match self.get(i, j) {
            Some(v) => v,
            None => panic!(
                "matrix index ({i}, {j}) out of range for {}x{}",
                self.nrow(),
                self.ncol()
            ),
        }
    }
}

impl<T: Element> IndexMut<(usize, usize)> for Matrix<'_, T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        let (nrow, ncol) = (self.nrow(), self.ncol());
        match self.get_mut(i, j) {
            Some(v) => v,
            None => panic!("matrix index ({i}, {j}) out of range for {nrow}x{ncol}"),
        }
    }
}

impl<T: Element> Index<usize> for Matrix<'_, T> {
    type Output = T;

    fn index(&self, k: usize) -> &T {
        &self.as_slice()[k]
    }
}

impl<T: Element> IndexMut<usize> for Matrix<'_, T> {
    fn index_mut(&mut self, k: usize) -> &mut T {
        &mut self.as_mut_slice()[k]
    }
}

impl<'a, T> From<Storage<'a, MatrixHandle<T>>> for Matrix<'a, T> {
    fn from(storage: Storage<'a, MatrixHandle<T>>) -> Self {
        Self { storage }
    }
}

impl<'a, T> From<Matrix<'a, T>> for Storage<'a, MatrixHandle<T>> {
    fn from(matrix: Matrix<'a, T>) -> Self {
        matrix.storage
    }
}

/// Identity first, then flat length and elementwise comparison.
///
/// Shape is not compared: a `1 × 6` and a `2 × 3` matrix holding the same
/// row-major data are equal. Use [`Matrix::same_shape_eq`] to also require
/// matching dimensions.
impl<T: Element> PartialEq<Matrix<'_, T>> for Matrix<'_, T> {
    fn eq(&self, other: &Matrix<'_, T>) -> bool {
        self.storage.same_handle(&other.storage) || self.as_slice() == other.as_slice()
    }
}

impl<T: Element> fmt::Debug for Matrix<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("mode", &self.mode())
            .field("nrow", &self.nrow())
            .field("ncol", &self.ncol())
            .field("data", &self.as_slice())
            .finish()
    }
}
