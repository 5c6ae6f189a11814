//! Capacity bookkeeping shared by every handle type.
//!
//! All growth goes through [`Limits`], which checks the configured slot
//! limit and then asks the allocator with `try_reserve_exact`. Both checks
//! happen before any element is touched, so a failed request leaves the
//! buffer exactly as it was.
//!
//! The limit caps the number of live elements. A pure capacity reservation
//! that the buffer already satisfies is a no-op, even for zero-sized
//! elements whose capacity is unbounded; operations that set the length
//! check the limit against that length.

use tracing::{trace, warn};

use crate::config::{GrowthPolicy, RuntimeConfig};
use crate::error::RuntimeError;

/// Per-handle copy of the config values that govern growth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Limits {
    pub(crate) max_elements: usize,
    pub(crate) growth: GrowthPolicy,
}

impl Limits {
    pub(crate) fn from_config(config: &RuntimeConfig) -> Self {
        Self {
            max_elements: config.max_elements,
            growth: config.growth,
        }
    }

    /// Reject a total length this handle may never hold.
    pub(crate) fn check(&self, requested: usize) -> Result<(), RuntimeError> {
        if requested > self.max_elements {
            warn!(
                requested,
                limit = self.max_elements,
                "buffer request exceeds configured limit"
            );
            return Err(RuntimeError::CapacityExceeded {
                requested,
                limit: self.max_elements,
            });
        }
        Ok(())
    }

    /// Ensure `data` can hold `total` slots without reallocating.
    ///
    /// No-op when the capacity is already sufficient.
    pub(crate) fn reserve_exact<X>(&self, data: &mut Vec<X>, total: usize) -> Result<(), RuntimeError> {
        if total <= data.capacity() {
            return Ok(());
        }
        self.check(total)?;
        data.try_reserve_exact(total - data.len()).map_err(|_| {
            warn!(requested = total, "allocator refused buffer growth");
            RuntimeError::OutOfMemory { requested: total }
        })?;
        trace!(len = data.len(), capacity = data.capacity(), "buffer grown");
        Ok(())
    }

    /// Ensure `data` can be set to exactly `len` live slots.
    pub(crate) fn fit<X>(&self, data: &mut Vec<X>, len: usize) -> Result<(), RuntimeError> {
        self.check(len)?;
        self.reserve_exact(data, len)
    }

    /// Ensure `data` can take `additional` more slots, growing by policy.
    pub(crate) fn grow<X>(&self, data: &mut Vec<X>, additional: usize) -> Result<(), RuntimeError> {
        let needed = data
            .len()
            .checked_add(additional)
            .ok_or(RuntimeError::CapacityExceeded {
                requested: usize::MAX,
                limit: self.max_elements,
            })?;
        self.check(needed)?;
        if needed <= data.capacity() {
            return Ok(());
        }
        let target = match self.growth {
            GrowthPolicy::Doubling => data
                .capacity()
                .saturating_mul(2)
                .max(needed)
                .min(self.max_elements),
            GrowthPolicy::Exact => needed,
        };
        self.reserve_exact(data, target)
    }
}
