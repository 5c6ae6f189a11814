//! Wrapper-level error types.

use std::error::Error;
use std::fmt;

use duplex_core::RuntimeError;

/// Errors reported by wrapper operations.
///
/// An operation that returns an error has left its wrapper in the state it
/// had before the call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContainerError {
    /// The runtime could not provide storage for the operation.
    AllocationFailed {
        /// The runtime's report.
        source: RuntimeError,
    },
    /// The caller broke an operation's precondition.
    PreconditionViolation {
        /// What was violated.
        reason: String,
    },
}

impl ContainerError {
    /// The error for operations attempted on a moved-from wrapper.
    pub fn moved_from() -> Self {
        Self::PreconditionViolation {
            reason: "wrapper is in the moved-from state".into(),
        }
    }

    /// Whether this is an allocation failure.
    pub fn is_allocation_failure(&self) -> bool {
        matches!(self, Self::AllocationFailed { .. })
    }
}

impl From<RuntimeError> for ContainerError {
    fn from(err: RuntimeError) -> Self {
        if err.is_allocation_failure() {
            Self::AllocationFailed { source: err }
        } else {
            Self::PreconditionViolation {
                reason: err.to_string(),
            }
        }
    }
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { source } => write!(f, "allocation failed: {source}"),
            Self::PreconditionViolation { reason } => {
                write!(f, "precondition violated: {reason}")
            }
        }
    }
}

impl Error for ContainerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AllocationFailed { source } => Some(source),
            Self::PreconditionViolation { .. } => None,
        }
    }
}
