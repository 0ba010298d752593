//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod oracle;
pub mod progress;
pub mod result_scorer;
pub mod transcript_logger;
pub mod worker_dispatcher;
