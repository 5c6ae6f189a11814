//! Runtime configuration parameters.

use crate::error::RuntimeError;

/// How a handle grows its capacity when an append needs more room.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GrowthPolicy {
    /// Double the capacity (clamped to the limit). Amortised O(1) appends.
    #[default]
    Doubling,
    /// Grow to exactly the size needed.
    Exact,
}

/// Configuration shared by every handle created from it.
///
/// Handles copy the values they need at init time; changing a config
/// afterwards does not affect handles already created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Maximum number of slots a single handle may hold.
    ///
    /// Any primitive that would grow a handle past this limit fails with
    /// [`RuntimeError::CapacityExceeded`]. Must be non-zero.
    pub max_elements: usize,

    /// Capacity growth strategy for appends.
    pub growth: GrowthPolicy,
}

impl RuntimeConfig {
    /// Default slot limit: the largest length a `Vec` can describe.
    pub const DEFAULT_MAX_ELEMENTS: usize = isize::MAX as usize;

    /// Create a config with the default limit and growth policy.
    pub fn new() -> Self {
        Self {
            max_elements: Self::DEFAULT_MAX_ELEMENTS,
            growth: GrowthPolicy::Doubling,
        }
    }

    /// Replace the slot limit.
    pub fn with_max_elements(mut self, max_elements: usize) -> Self {
        self.max_elements = max_elements;
        self
    }

    /// Replace the growth policy.
    pub fn with_growth(mut self, growth: GrowthPolicy) -> Self {
        self.growth = growth;
        self
    }

    /// Check the config for values no handle could work with.
    pub fn validate(&self) -> Result<(), RuntimeError> {
        if self.max_elements == 0 {
            return Err(RuntimeError::InvalidConfig {
                reason: "max_elements must be at least 1",
            });
        }
        Ok(())
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}
