//! Thread-safe fixed-object-size slot pool
//!
//! Pre-allocate `N` equal-size slots once, hand them out and take them back
//! repeatedly without per-request heap allocation, and grow the pool in
//! place when it runs short:
//!
//! - One contiguous storage buffer; free slots reused LIFO off an index
//!   stack
//! - Checked-out slots tracked for release validation, iteration, and a
//!   leak report when the pool is dropped
//! - One mutex over all state — a deliberate simplicity-over-scalability
//!   choice; sharding and lock-free free lists are out of scope
//! - Handles wrap slot indices, so growth never invalidates slots that are
//!   currently checked out
//! - Diagnostics flow through an injectable [`DiagnosticSink`] rather than
//!   a process-wide logger
//!
//! # Features
//!
//! - `logging` (default): `tracing`-backed default sink
//! - `stats` (default): atomic operation counters
//!
//! # Example
//!
//! ```
//! use slotpool::SlotPool;
//!
//! let pool = SlotPool::new(128, 256)?;
//!
//! let slot = pool.acquire().expect("fresh pool has free slots");
//! pool.with_slot_mut(slot, |bytes| bytes[..4].copy_from_slice(b"work"))?;
//! pool.release(slot)?;
//! # Ok::<(), slotpool::PoolError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

pub mod error;
pub mod pool;
pub mod sink;

pub use error::{PoolError, Result};
#[cfg(feature = "stats")]
pub use pool::{PoolStats, PoolStatsSnapshot};
pub use pool::{PoolConfig, SlotHandle, SlotPool};
#[cfg(feature = "logging")]
pub use sink::TracingSink;
pub use sink::{CapturingSink, DiagnosticSink, NoopSink, Severity, SinkEvent};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
