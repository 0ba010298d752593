//! Port for structured transcript logging.
//!
//! Defines the [`TranscriptLogger`] trait for recording run events (plans,
//! worker results, merges, verdicts) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the run
//! transcript in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured transcript event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. The logger adds the timestamp.
pub struct TranscriptEvent {
    /// Event type identifier (e.g., "plan", "worker_result", "verdict").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl TranscriptEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging transcript events to a structured log.
///
/// The `log` method is synchronous and non-fallible so that logging never
/// disrupts a run; write failures are ignored by implementations.
pub trait TranscriptLogger: Send + Sync {
    /// Record a transcript event.
    fn log(&self, event: TranscriptEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoTranscriptLogger;

impl TranscriptLogger for NoTranscriptLogger {
    fn log(&self, _event: TranscriptEvent) {}
}
