//! Test fixtures for duplex development.
//!
//! Builders for the shapes tests keep reaching for: numbered vectors,
//! row-major numbered matrices, populated lists, and configs tight enough
//! to make allocation failure reachable.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use duplex_core::{GrowthPolicy, MatrixHandle, RuntimeConfig, VectorHandle};
use duplex_wrap::{Matrix, MatrixList, Vector, VectorList};

/// A config that refuses to hold more than `limit` slots per handle and
/// grows exactly, so capacity is predictable.
pub fn tight_config(limit: usize) -> RuntimeConfig {
    RuntimeConfig::new()
        .with_max_elements(limit)
        .with_growth(GrowthPolicy::Exact)
}

/// `[1.0, 2.0, ..., n]` as a runtime handle.
pub fn ramp_handle(n: usize) -> VectorHandle<f64> {
    VectorHandle::from((1..=n).map(|k| k as f64).collect::<Vec<_>>())
}

/// `[1.0, 2.0, ..., n]` as an owning vector.
pub fn ramp(n: usize) -> Vector<'static, f64> {
    Vector::capture(ramp_handle(n))
}

/// An `nrow × ncol` handle filled row-major with `1.0, 2.0, ...`.
pub fn numbered_matrix_handle(nrow: usize, ncol: usize) -> MatrixHandle<f64> {
    let values: Vec<f64> = (1..=nrow * ncol).map(|k| k as f64).collect();
    match MatrixHandle::init_array(&RuntimeConfig::default(), nrow, ncol, &values) {
        Ok(m) => m,
        Err(e) => panic!("fixture matrix {nrow}x{ncol}: {e}"),
    }
}

/// An owning `nrow × ncol` matrix filled row-major with `1.0, 2.0, ...`.
pub fn numbered_matrix(nrow: usize, ncol: usize) -> Matrix<'static, f64> {
    Matrix::capture(numbered_matrix_handle(nrow, ncol))
}

/// A list holding one ramp per entry of `lens`.
pub fn ramp_list(lens: &[usize]) -> VectorList<'static, f64> {
    let mut list = VectorList::new();
    for &n in lens {
        if let Err(e) = list.push_back(ramp(n)) {
            panic!("fixture list push: {e}");
        }
    }
    list
}

/// A list holding one numbered matrix per `(nrow, ncol)` entry.
pub fn matrix_list(shapes: &[(usize, usize)]) -> MatrixList<'static, f64> {
    let mut list = MatrixList::new();
    for &(nrow, ncol) in shapes {
        if let Err(e) = list.push_back(numbered_matrix(nrow, ncol)) {
            panic!("fixture list push: {e}");
        }
    }
    list
}
