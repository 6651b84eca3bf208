//! Core slot pool implementation

use std::sync::Arc;

use parking_lot::Mutex;

use super::{PoolConfig, SlotHandle};
#[cfg(feature = "stats")]
use super::PoolStats;
use crate::error::{PoolError, Result};
use crate::sink::{DiagnosticSink, default_sink};

/// Thread-safe pool of fixed-size byte slots
///
/// Storage is one contiguous buffer; slot `i` occupies bytes
/// `[i * object_size, (i + 1) * object_size)`. Free slots are reused LIFO
/// off a stack of indices, and checked-out slots are tracked so the pool can
/// report leaks when dropped. One mutex serializes every operation; there is
/// no lock splitting and no per-thread caching. Sharding and lock-free free
/// lists are out of scope.
///
/// An exhausted pool answers `None` from [`acquire`](SlotPool::acquire)
/// rather than an error; callers retry or fail at a higher layer.
///
/// # Example
/// ```
/// use slotpool::SlotPool;
///
/// let pool = SlotPool::new(4, 64)?;
///
/// let slot = pool.acquire().expect("fresh pool has free slots");
/// pool.with_slot_mut(slot, |bytes| bytes[0] = 0x2a)?;
/// pool.release(slot)?;
/// # Ok::<(), slotpool::PoolError>(())
/// ```
pub struct SlotPool {
    inner: Mutex<PoolInner>,
    config: PoolConfig,
    sink: Arc<dyn DiagnosticSink>,
    #[cfg(feature = "stats")]
    stats: PoolStats,
}

/// Everything capacity-dependent lives under the one mutex.
struct PoolInner {
    storage: Vec<u8>,
    free: Vec<usize>,
    outstanding: Vec<usize>,
    capacity: usize,
}

impl PoolInner {
    fn slot(&self, index: usize, object_size: usize) -> &[u8] {
        &self.storage[index * object_size..(index + 1) * object_size]
    }

    fn slot_mut(&mut self, index: usize, object_size: usize) -> &mut [u8] {
        &mut self.storage[index * object_size..(index + 1) * object_size]
    }
}

impl SlotPool {
    /// Create a pool with the given slot count and object size
    pub fn new(capacity: usize, object_size: usize) -> Result<Self> {
        Self::with_config(PoolConfig::new(capacity, object_size))
    }

    /// Create a pool with custom configuration
    pub fn with_config(config: PoolConfig) -> Result<Self> {
        Self::with_sink(config, default_sink())
    }

    /// Create a pool that reports diagnostics through the given sink
    pub fn with_sink(config: PoolConfig, sink: Arc<dyn DiagnosticSink>) -> Result<Self> {
        if config.capacity == 0 {
            sink.error("pool capacity must be non-zero");
            return Err(PoolError::invalid_argument("capacity must be non-zero"));
        }
        if config.object_size == 0 {
            sink.error("pool object size must be non-zero");
            return Err(PoolError::invalid_argument("object size must be non-zero"));
        }
        let Some(bytes) = config.capacity.checked_mul(config.object_size) else {
            sink.error("pool byte size overflows usize");
            return Err(PoolError::invalid_argument(
                "capacity times object size overflows usize",
            ));
        };

        // Reserve fallibly so an allocation failure comes back as an error
        // instead of an abort. Nothing is half-built on failure: the vectors
        // are dropped whole.
        let mut storage = Vec::new();
        if storage.try_reserve_exact(bytes).is_err() {
            sink.error(&format!("failed to reserve {bytes} bytes of slot storage"));
            return Err(PoolError::allocation_failed(bytes));
        }
        storage.resize(bytes, 0);

        let mut free = Vec::new();
        if free.try_reserve_exact(config.capacity).is_err() {
            sink.error(&format!(
                "failed to reserve the free stack for {} slots",
                config.capacity
            ));
            return Err(PoolError::allocation_failed(config.capacity));
        }
        // Slot i sits at stack position i, so the highest index is reused first.
        free.extend(0..config.capacity);

        sink.info(&format!(
            "pool initialized with {} slots of {} bytes",
            config.capacity, config.object_size
        ));

        Ok(Self {
            inner: Mutex::new(PoolInner {
                storage,
                free,
                outstanding: Vec::new(),
                capacity: config.capacity,
            }),
            config,
            sink,
            #[cfg(feature = "stats")]
            stats: PoolStats::default(),
        })
    }

    /// Check a slot out of the pool
    ///
    /// Pops the most recently freed slot (LIFO; no ordering guarantee beyond
    /// "some free slot") and hands it back zeroed. Returns `None` when every
    /// slot is checked out — backpressure, not failure.
    pub fn acquire(&self) -> Option<SlotHandle> {
        let mut inner = self.inner.lock();
        let Some(index) = inner.free.pop() else {
            drop(inner);
            self.sink.warning("pool exhausted; no free slots");
            #[cfg(feature = "stats")]
            if self.config.track_stats {
                self.stats.record_acquire_failure();
            }
            return None;
        };
        inner.outstanding.push(index);
        inner.slot_mut(index, self.config.object_size).fill(0);
        let available = inner.free.len();
        #[cfg(feature = "stats")]
        let outstanding = inner.outstanding.len();
        drop(inner);

        self.sink.info(&format!("acquired slot {index}; {available} available"));
        #[cfg(feature = "stats")]
        if self.config.track_stats {
            self.stats.record_acquire(outstanding);
        }
        Some(SlotHandle(index))
    }

    /// Return a checked-out slot to the pool
    ///
    /// # Errors
    /// [`PoolError::NotOwned`] if the handle is not currently checked out
    /// (double release or a foreign handle) — the pool is left untouched.
    /// [`PoolError::FreeStackOverflow`] if the free stack is somehow already
    /// full; unreachable while the pool invariants hold, refused rather than
    /// corrupting the stack.
    pub fn release(&self, handle: SlotHandle) -> Result<()> {
        let mut inner = self.inner.lock();
        let Some(pos) = inner.outstanding.iter().position(|&i| i == handle.0) else {
            drop(inner);
            self.sink
                .error(&format!("release of slot {handle} that is not checked out"));
            return Err(PoolError::not_owned(handle));
        };
        if inner.free.len() == inner.capacity {
            let capacity = inner.capacity;
            drop(inner);
            self.sink.error(&format!(
                "free stack already holds {capacity} entries; refusing release of slot {handle}"
            ));
            return Err(PoolError::free_stack_overflow(capacity));
        }
        inner.outstanding.swap_remove(pos);
        if let Some(pattern) = self.config.release_pattern {
            inner.slot_mut(handle.0, self.config.object_size).fill(pattern);
        }
        inner.free.push(handle.0);
        let available = inner.free.len();
        drop(inner);

        self.sink
            .info(&format!("released slot {handle}; {available} available"));
        #[cfg(feature = "stats")]
        if self.config.track_stats {
            self.stats.record_release();
        }
        Ok(())
    }

    /// Grow the pool to `new_capacity` slots
    ///
    /// Grow-only. The new slots are appended to the top of the free stack.
    /// Handles wrap slot indices, so a resize never invalidates slots that
    /// are currently checked out, even when the storage buffer reallocates.
    ///
    /// # Errors
    /// [`PoolError::InvalidArgument`] if `new_capacity` does not grow the
    /// pool. [`PoolError::AllocationFailed`] if either buffer cannot be
    /// grown; the pool is left exactly in its pre-resize state.
    pub fn resize(&self, new_capacity: usize) -> Result<()> {
        let mut inner = self.inner.lock();
        let old_capacity = inner.capacity;
        if new_capacity <= old_capacity {
            drop(inner);
            self.sink.error(&format!(
                "resize to {new_capacity} does not grow the pool (capacity {old_capacity})"
            ));
            return Err(PoolError::invalid_argument("resize must grow the pool"));
        }
        let Some(new_bytes) = new_capacity.checked_mul(self.config.object_size) else {
            drop(inner);
            self.sink.error("resized pool byte size overflows usize");
            return Err(PoolError::invalid_argument(
                "capacity times object size overflows usize",
            ));
        };

        // Reserve both buffers before mutating either, so a failure leaves
        // the pool in its pre-resize state.
        let additional_bytes = new_bytes - inner.storage.len();
        let additional_slots = new_capacity - inner.free.len();
        if inner.storage.try_reserve_exact(additional_bytes).is_err()
            || inner.free.try_reserve_exact(additional_slots).is_err()
        {
            drop(inner);
            self.sink
                .error(&format!("failed to reserve {new_bytes} bytes for resize"));
            return Err(PoolError::allocation_failed(new_bytes));
        }

        inner.storage.resize(new_bytes, 0);
        inner.free.extend(old_capacity..new_capacity);
        inner.capacity = new_capacity;
        let available = inner.free.len();
        drop(inner);

        self.sink.info(&format!(
            "resized pool from {old_capacity} to {new_capacity} slots; {available} available"
        ));
        #[cfg(feature = "stats")]
        if self.config.track_stats {
            self.stats.record_resize();
        }
        Ok(())
    }

    /// Visit every checked-out slot
    ///
    /// The visitor receives each outstanding slot's handle and bytes, in
    /// unspecified order, while the pool mutex is held. The visitor must not
    /// call back into the same pool (acquire, release, resize, slot access)
    /// — the mutex is not reentrant and doing so deadlocks.
    pub fn for_each_outstanding<F>(&self, mut visitor: F)
    where
        F: FnMut(SlotHandle, &[u8]),
    {
        let inner = self.inner.lock();
        for &index in &inner.outstanding {
            visitor(SlotHandle(index), inner.slot(index, self.config.object_size));
        }
    }

    /// Read a checked-out slot's bytes
    ///
    /// The closure runs while the pool mutex is held and must not call back
    /// into the same pool.
    ///
    /// # Errors
    /// [`PoolError::NotOwned`] if the handle is not currently checked out.
    pub fn with_slot<F, R>(&self, handle: SlotHandle, f: F) -> Result<R>
    where
        F: FnOnce(&[u8]) -> R,
    {
        let inner = self.inner.lock();
        if !inner.outstanding.contains(&handle.0) {
            drop(inner);
            self.sink
                .error(&format!("access to slot {handle} that is not checked out"));
            return Err(PoolError::not_owned(handle));
        }
        Ok(f(inner.slot(handle.0, self.config.object_size)))
    }

    /// Mutate a checked-out slot's bytes
    ///
    /// The closure runs while the pool mutex is held and must not call back
    /// into the same pool.
    ///
    /// # Errors
    /// [`PoolError::NotOwned`] if the handle is not currently checked out.
    pub fn with_slot_mut<F, R>(&self, handle: SlotHandle, f: F) -> Result<R>
    where
        F: FnOnce(&mut [u8]) -> R,
    {
        let mut inner = self.inner.lock();
        if !inner.outstanding.contains(&handle.0) {
            drop(inner);
            self.sink
                .error(&format!("access to slot {handle} that is not checked out"));
            return Err(PoolError::not_owned(handle));
        }
        Ok(f(inner.slot_mut(handle.0, self.config.object_size)))
    }

    /// Number of slots currently free
    pub fn available(&self) -> usize {
        self.inner.lock().free.len()
    }

    /// Total number of slots
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity
    }

    /// Number of slots currently checked out
    pub fn outstanding_count(&self) -> usize {
        self.inner.lock().outstanding.len()
    }

    /// Byte size of one slot
    pub fn object_size(&self) -> usize {
        self.config.object_size
    }

    /// Whether every slot is currently checked out
    pub fn is_exhausted(&self) -> bool {
        self.inner.lock().free.is_empty()
    }

    /// Operation counters for this pool
    #[cfg(feature = "stats")]
    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }
}

impl Drop for SlotPool {
    /// Reports every still-outstanding slot through the sink before the
    /// storage is freed. Leaks are caller bugs, not pool bugs; they never
    /// block teardown.
    fn drop(&mut self) {
        let inner = self.inner.get_mut();
        for &index in &inner.outstanding {
            self.sink
                .warning(&format!("slot {index} still checked out at pool teardown"));
        }
        self.sink
            .info(&format!("pool torn down; {} slots freed", inner.capacity));
    }
}
