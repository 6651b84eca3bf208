//! Statistics tracking for slot pools

use core::fmt;
use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Atomic operation counters for a pool
///
/// Counters are updated with relaxed ordering; they are diagnostics, not
/// synchronization.
#[derive(Debug, Default)]
pub struct PoolStats {
    pub(crate) acquires: AtomicU64,
    pub(crate) acquire_failures: AtomicU64,
    pub(crate) releases: AtomicU64,
    pub(crate) resizes: AtomicU64,
    pub(crate) peak_outstanding: AtomicUsize,
}

impl PoolStats {
    /// Record a successful acquire with the resulting outstanding count
    pub(crate) fn record_acquire(&self, outstanding: usize) {
        self.acquires.fetch_add(1, Ordering::Relaxed);
        self.update_peak_outstanding(outstanding);
    }

    /// Record an acquire that found the pool exhausted
    pub(crate) fn record_acquire_failure(&self) {
        self.acquire_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful release
    pub(crate) fn record_release(&self) {
        self.releases.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful resize
    pub(crate) fn record_resize(&self) {
        self.resizes.fetch_add(1, Ordering::Relaxed);
    }

    fn update_peak_outstanding(&self, outstanding: usize) {
        let mut peak = self.peak_outstanding.load(Ordering::Relaxed);
        while outstanding > peak {
            match self.peak_outstanding.compare_exchange_weak(
                peak,
                outstanding,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(current) => peak = current,
            }
        }
    }

    /// Total successful acquires
    pub fn total_acquires(&self) -> u64 {
        self.acquires.load(Ordering::Relaxed)
    }

    /// Total acquires that returned no slot
    pub fn total_acquire_failures(&self) -> u64 {
        self.acquire_failures.load(Ordering::Relaxed)
    }

    /// Total successful releases
    pub fn total_releases(&self) -> u64 {
        self.releases.load(Ordering::Relaxed)
    }

    /// Total successful resizes
    pub fn total_resizes(&self) -> u64 {
        self.resizes.load(Ordering::Relaxed)
    }

    /// Highest number of slots checked out at once
    pub fn peak_outstanding(&self) -> usize {
        self.peak_outstanding.load(Ordering::Relaxed)
    }

    /// Fraction of acquires that found a free slot (0.0 - 1.0)
    pub fn hit_rate(&self) -> f64 {
        let hits = self.total_acquires();
        let total = hits + self.total_acquire_failures();
        if total == 0 { 0.0 } else { hits as f64 / total as f64 }
    }
}

/// Point-in-time copy of [`PoolStats`]
#[derive(Debug, Clone, Copy)]
pub struct PoolStatsSnapshot {
    /// Total successful acquires
    pub acquires: u64,
    /// Total acquires that returned no slot
    pub acquire_failures: u64,
    /// Total successful releases
    pub releases: u64,
    /// Total successful resizes
    pub resizes: u64,
    /// Highest number of slots checked out at once
    pub peak_outstanding: usize,
    /// Fraction of acquires that found a free slot
    pub hit_rate: f64,
}

impl From<&PoolStats> for PoolStatsSnapshot {
    fn from(stats: &PoolStats) -> Self {
        Self {
            acquires: stats.total_acquires(),
            acquire_failures: stats.total_acquire_failures(),
            releases: stats.total_releases(),
            resizes: stats.total_resizes(),
            peak_outstanding: stats.peak_outstanding(),
            hit_rate: stats.hit_rate(),
        }
    }
}

impl fmt::Display for PoolStatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pool statistics:")?;
        writeln!(
            f,
            "  Acquires: {} (hit rate: {:.2}%)",
            self.acquires,
            self.hit_rate * 100.0
        )?;
        writeln!(f, "  Exhausted acquires: {}", self.acquire_failures)?;
        writeln!(f, "  Releases: {}", self.releases)?;
        writeln!(f, "  Resizes: {}", self.resizes)?;
        writeln!(f, "  Peak outstanding: {}", self.peak_outstanding)?;
        Ok(())
    }
}
