//! Runtime error types.

use std::error::Error;
use std::fmt;

/// Errors reported by a runtime primitive.
///
/// A primitive that returns an error has not modified its handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuntimeError {
    /// The request would grow the handle past its configured slot limit.
    CapacityExceeded {
        /// Number of slots the operation needed.
        requested: usize,
        /// The handle's `max_elements` limit.
        limit: usize,
    },
    /// The system allocator refused to provide the requested storage.
    OutOfMemory {
        /// Number of slots the operation needed.
        requested: usize,
    },
    /// Shaped data did not match the shape it was declared with.
    ShapeMismatch {
        /// Number of elements the declared shape requires.
        expected: usize,
        /// Number of elements actually supplied.
        found: usize,
    },
    /// A [`RuntimeConfig`](crate::RuntimeConfig) failed validation.
    InvalidConfig {
        /// What was wrong with the configuration.
        reason: &'static str,
    },
}

impl RuntimeError {
    /// Whether this error means storage could not be obtained.
    pub fn is_allocation_failure(&self) -> bool {
        matches!(
            self,
            Self::CapacityExceeded { .. } | Self::OutOfMemory { .. }
        )
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded { requested, limit } => {
                write!(
                    f,
                    "buffer limit exceeded: requested {requested} slots, limit {limit} slots"
                )
            }
            Self::OutOfMemory { requested } => {
                write!(f, "allocation of {requested} slots failed")
            }
            Self::ShapeMismatch { expected, found } => {
                write!(f, "shape mismatch: expected {expected} elements, found {found}")
            }
            Self::InvalidConfig { reason } => write!(f, "invalid runtime config: {reason}"),
        }
    }
}

impl Error for RuntimeError {}
