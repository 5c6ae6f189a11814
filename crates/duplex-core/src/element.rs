//! Element bound for flat and matrix buffers.

use std::fmt::Debug;

/// A fixed-size value that can live in a [`VectorHandle`](crate::VectorHandle)
/// or [`MatrixHandle`](crate::MatrixHandle).
///
/// New slots created by growth are filled with `T::default()`.
pub trait Element: Copy + Default + PartialEq + Debug {}

impl<T: Copy + Default + PartialEq + Debug> Element for T {}
