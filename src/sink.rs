//! Injectable diagnostic sink
//!
//! The pool reports its lifecycle through a [`DiagnosticSink`] supplied at
//! construction time instead of a process-wide logger, so tests can
//! substitute a capturing sink without global state leaking between cases.
//! Diagnostics have no effect on pool correctness.

use std::sync::Arc;

use parking_lot::Mutex;

/// Severity of a diagnostic event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Routine lifecycle event
    Info,
    /// Expected but noteworthy condition (exhaustion, leaked slots)
    Warning,
    /// Caller misuse or resource failure
    Error,
}

/// Sink for pool diagnostics
///
/// Implementations must be cheap and must not call back into the pool that
/// emitted the event; events are emitted after the pool's mutex is released.
pub trait DiagnosticSink: Send + Sync {
    /// Report a routine lifecycle event
    fn info(&self, message: &str);

    /// Report an expected but noteworthy condition
    fn warning(&self, message: &str);

    /// Report caller misuse or a resource failure
    fn error(&self, message: &str);
}

/// Sink that discards every event
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn info(&self, _message: &str) {}

    fn warning(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}

/// A single event recorded by [`CapturingSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkEvent {
    /// Severity the event was reported with
    pub severity: Severity,
    /// Formatted message
    pub message: String,
}

/// Sink that records events in order, for assertions in tests
///
/// # Example
/// ```
/// use std::sync::Arc;
///
/// use slotpool::{CapturingSink, PoolConfig, Severity, SlotPool};
///
/// let sink = Arc::new(CapturingSink::new());
/// let pool = SlotPool::with_sink(PoolConfig::new(2, 16), sink.clone()).unwrap();
/// drop(pool);
///
/// assert!(sink.events().iter().all(|e| e.severity == Severity::Info));
/// ```
#[derive(Default)]
pub struct CapturingSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl CapturingSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far, in emission order
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().clone()
    }

    /// Messages recorded at the given severity, in emission order
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.severity == severity)
            .map(|e| e.message.clone())
            .collect()
    }

    fn record(&self, severity: Severity, message: &str) {
        self.events.lock().push(SinkEvent { severity, message: message.to_owned() });
    }
}

impl DiagnosticSink for CapturingSink {
    fn info(&self, message: &str) {
        self.record(Severity::Info, message);
    }

    fn warning(&self, message: &str) {
        self.record(Severity::Warning, message);
    }

    fn error(&self, message: &str) {
        self.record(Severity::Error, message);
    }
}

/// Sink that forwards events to `tracing` at the matching level
#[cfg(feature = "logging")]
pub struct TracingSink;

#[cfg(feature = "logging")]
impl DiagnosticSink for TracingSink {
    fn info(&self, message: &str) {
        tracing::info!(target: "slotpool", "{message}");
    }

    fn warning(&self, message: &str) {
        tracing::warn!(target: "slotpool", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "slotpool", "{message}");
    }
}

/// Sink used when the caller does not supply one
pub(crate) fn default_sink() -> Arc<dyn DiagnosticSink> {
    #[cfg(feature = "logging")]
    {
        Arc::new(TracingSink)
    }
    #[cfg(not(feature = "logging"))]
    {
        Arc::new(NoopSink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capturing_sink_preserves_order() {
        let sink = CapturingSink::new();
        sink.info("first");
        sink.warning("second");
        sink.error("third");

        let events = sink.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].severity, Severity::Info);
        assert_eq!(events[1].severity, Severity::Warning);
        assert_eq!(events[2].severity, Severity::Error);
        assert_eq!(events[1].message, "second");
    }

    #[test]
    fn test_messages_filters_by_severity() {
        let sink = CapturingSink::new();
        sink.info("a");
        sink.warning("b");
        sink.info("c");

        assert_eq!(sink.messages(Severity::Info), vec!["a", "c"]);
        assert_eq!(sink.messages(Severity::Warning), vec!["b"]);
        assert!(sink.messages(Severity::Error).is_empty());
    }
}
