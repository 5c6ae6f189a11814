//! Buffer runtime for the duplex container wrappers.
//!
//! This crate is the manually-managed side of the workspace: it defines the
//! handle records (flat vectors, row-major matrices, lists of nested
//! handles) and the primitive operations over them. Handles know nothing
//! about ownership modes; that duality lives in `duplex-wrap`, which
//! consumes this crate only through the primitive set.
//!
//! # Handles
//!
//! ```text
//! VectorHandle<T>   begin .. end .. capacity-end   (flat buffer)
//! MatrixHandle<T>   VectorHandle<T> + nrow + ncol  (row-major grid)
//! ListHandle<H>     begin .. end .. capacity-end   (each slot is an H)
//! ```
//!
//! Every handle is created against a [`RuntimeConfig`] and refuses to grow
//! past its `max_elements` limit, reporting [`RuntimeError::CapacityExceeded`]
//! and leaving its contents untouched.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod buffer;
pub mod config;
pub mod element;
pub mod error;
pub mod list;
pub mod matrix;
pub mod slot;
pub mod vector;

pub use config::{GrowthPolicy, RuntimeConfig};
pub use element::Element;
pub use error::RuntimeError;
pub use list::ListHandle;
pub use matrix::MatrixHandle;
pub use slot::Slot;
pub use vector::VectorHandle;
