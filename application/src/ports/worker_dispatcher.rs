//! Worker dispatch port
//!
//! Executes one work item against its target and returns the worker's
//! result. Implementations live in the infrastructure layer.

use async_trait::async_trait;
use scribe_domain::{ConversationHistory, WorkItem, WorkerResult};

/// Dispatches work items to workers
///
/// Failures never propagate as errors: they come back as a
/// [`WorkerResult`] carrying an error indicator so that the aggregator can
/// classify or ignore them.
#[async_trait]
pub trait WorkerDispatcher: Send + Sync {
    /// Run `item` against its target. Called once per work item.
    async fn dispatch(&self, item: WorkItem, history: ConversationHistory) -> WorkerResult;
}
