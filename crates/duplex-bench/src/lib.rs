//! Benchmark profiles for the duplex containers.
//!
//! Provides pre-built workloads shared by the criterion benches:
//!
//! - [`profile_config`]: an unbounded runtime configuration with a chosen growth policy
//! - [`filled_list`]: a vector list of `count` buffers of `len` elements each
//! - [`row_major_matrix`]: an `nrow x ncol` matrix with distinct cell values

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use duplex_core::{GrowthPolicy, RuntimeConfig};
use duplex_wrap::{ContainerError, Matrix, Vector, VectorList};

/// Build a runtime configuration with no practical size limit.
pub fn profile_config(growth: GrowthPolicy) -> RuntimeConfig {
    RuntimeConfig::default().with_growth(growth)
}

/// Build a list holding `count` buffers, each `len` elements of `1.0`.
pub fn filled_list(count: usize, len: usize) -> Result<VectorList<'static, f64>, ContainerError> {
    let mut list = VectorList::new();
    list.reserve(count)?;
    for _ in 0..count {
        let mut v = Vector::with_len(len)?;
        v.as_mut_slice().fill(1.0);
        list.push_back(v)?;
    }
    Ok(list)
}

/// Build an `nrow x ncol` matrix whose cell `(i, j)` holds `i * ncol + j`.
pub fn row_major_matrix(nrow: usize, ncol: usize) -> Result<Matrix<'static, f64>, ContainerError> {
    let mut m = Matrix::with_dims(nrow, ncol)?;
    for (k, cell) in m.as_mut_slice().iter_mut().enumerate() {
        *cell = k as f64;
    }
    Ok(m)
}
