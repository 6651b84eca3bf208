//! Fixed-object-size slot pool
//!
//! One contiguous buffer of `capacity * object_size` bytes, handed out slot
//! by slot. The free stack reuses slots LIFO; checked-out slots are tracked
//! so leaks can be reported when the pool is dropped. A single mutex
//! serializes every operation.

mod handle;
mod slot_pool;
#[cfg(feature = "stats")]
mod stats;

pub use handle::SlotHandle;
pub use slot_pool::SlotPool;
#[cfg(feature = "stats")]
pub use stats::{PoolStats, PoolStatsSnapshot};

/// Configuration for a [`SlotPool`]
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of slots to allocate up front
    pub capacity: usize,

    /// Byte size of one slot; fixed for the life of the pool
    pub object_size: usize,

    /// Byte pattern written over a slot when it is released
    ///
    /// Acquired slots are always zeroed; the release pattern makes
    /// use-after-release visible in a debugger.
    pub release_pattern: Option<u8>,

    /// Enable statistics collection
    #[cfg(feature = "stats")]
    pub track_stats: bool,
}

impl PoolConfig {
    /// Configuration with the given slot count and object size
    pub fn new(capacity: usize, object_size: usize) -> Self {
        Self {
            capacity,
            object_size,
            release_pattern: None,
            #[cfg(feature = "stats")]
            track_stats: true,
        }
    }

    /// Debug configuration: released slots are filled with `0xDD`
    pub fn debug(capacity: usize, object_size: usize) -> Self {
        Self { release_pattern: Some(0xDD), ..Self::new(capacity, object_size) }
    }

    /// Set the release fill pattern
    #[must_use = "builder methods must be chained or built"]
    pub fn with_release_pattern(mut self, pattern: Option<u8>) -> Self {
        self.release_pattern = pattern;
        self
    }

    /// Enable or disable statistics tracking
    #[cfg(feature = "stats")]
    #[must_use = "builder methods must be chained or built"]
    pub fn with_stats(mut self, track_stats: bool) -> Self {
        self.track_stats = track_stats;
        self
    }
}
