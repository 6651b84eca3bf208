//! Error types for pool operations

use crate::pool::SlotHandle;

/// Result type for pool operations
pub type Result<T> = core::result::Result<T, PoolError>;

/// Pool operation errors
///
/// An exhausted pool is not represented here: [`SlotPool::acquire`]
/// answers `None` in that case, which callers treat as backpressure
/// rather than failure.
///
/// [`SlotPool::acquire`]: crate::pool::SlotPool::acquire
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Caller-supplied parameter is unusable
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument
        reason: String,
    },

    /// Backing buffer could not be reserved
    #[error("failed to reserve {requested} bytes")]
    AllocationFailed {
        /// Total byte size that was requested
        requested: usize,
    },

    /// Handle does not refer to a currently checked-out slot
    #[error("slot {slot} is not checked out of this pool")]
    NotOwned {
        /// The offending handle
        slot: SlotHandle,
    },

    /// Free stack is already full (consistency guard on release)
    #[error("free stack already holds {capacity} entries")]
    FreeStackOverflow {
        /// Pool capacity at the time of the refused release
        capacity: usize,
    },
}

impl PoolError {
    /// Create an invalid argument error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument { reason: reason.into() }
    }

    /// Create an allocation failure error
    pub fn allocation_failed(requested: usize) -> Self {
        Self::AllocationFailed { requested }
    }

    /// Create a not-owned error for the given handle
    pub fn not_owned(slot: SlotHandle) -> Self {
        Self::NotOwned { slot }
    }

    /// Create a free stack overflow error
    pub fn free_stack_overflow(capacity: usize) -> Self {
        Self::FreeStackOverflow { capacity }
    }
}
