//! Owning/aliasing container wrappers over duplex runtime handles.
//!
//! Each wrapper holds its handle through a [`Storage`]:
//!
//! ```text
//! Storage<'a, H>
//! ├── Owned(H)          wrapper releases the buffer on drop
//! ├── Aliased(&'a mut H) view into a handle owned elsewhere
//! └── Empty             moved-from; len 0, refuses to allocate
//! ```
//!
//! - [`Vector`] wraps a `VectorHandle<T>` (flat buffer).
//! - [`Matrix`] wraps a `MatrixHandle<T>` (row-major grid).
//! - [`List`] wraps a `ListHandle<H>` whose slots are nested handles.
//!   Elements go in by move and come back out as aliasing or owning
//!   wrappers.
//!
//! Allocation failures surface as [`ContainerError::AllocationFailed`] and
//! leave the wrapper unchanged.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod list;
pub mod matrix;
pub mod storage;
pub mod vector;

pub use error::ContainerError;
pub use list::{List, MatrixList, VectorList, Wrap};
pub use matrix::Matrix;
pub use storage::{Mode, Storage};
pub use vector::Vector;
