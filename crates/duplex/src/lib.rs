//! Duplex: value-semantics containers that either own their buffer or
//! alias one owned elsewhere.
//!
//! This is the facade crate that re-exports the public API from the duplex
//! sub-crates. For most users, adding `duplex` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use duplex::prelude::*;
//!
//! let mut list = VectorList::new();
//!
//! // Ownership moves into the list; the alias writes into the slot.
//! let mut v = list.push_back_aliased(Vector::from([1.0, 2.0, 3.0])).unwrap();
//! v[0] = 10.0;
//!
//! assert_eq!(list.get(0).unwrap().as_slice(), &[10.0, 2.0, 3.0]);
//!
//! // Popping hands ownership back as an owning wrapper.
//! let owned = list.pop_back().unwrap();
//! assert!(owned.is_owning());
//! assert!(list.is_empty());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`runtime`] | `duplex-core` | Handles, primitives, `RuntimeConfig`, `RuntimeError` |
//! | [`wrap`] | `duplex-wrap` | `Vector`, `Matrix`, `List`, `Storage`, `ContainerError` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Runtime handles and primitives (`duplex-core`).
///
/// Use these directly when handing buffers across an API boundary:
/// wrappers [`capture`](wrap::Vector::capture) or
/// [`alias`](wrap::Vector::alias) them.
pub use duplex_core as runtime;

/// Owning/aliasing wrappers (`duplex-wrap`).
pub use duplex_wrap as wrap;

/// Common imports for typical usage.
///
/// ```rust
/// use duplex::prelude::*;
/// ```
pub mod prelude {
    pub use duplex_core::{
        GrowthPolicy, ListHandle, MatrixHandle, RuntimeConfig, RuntimeError, VectorHandle,
    };
    pub use duplex_wrap::{
        ContainerError, List, Matrix, MatrixList, Mode, Vector, VectorList,
    };
}
