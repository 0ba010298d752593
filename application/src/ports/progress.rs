//! Progress notification port
//!
//! Defines the interface for reporting progress during a writing run.

use scribe_domain::{LoopPhase, WorkItem, WorkerResult};

/// Callback for progress updates during a writing run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain text, etc.)
pub trait RoundProgressNotifier: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, round: u64, phase: LoopPhase, total_tasks: usize);

    /// Called when a phase completes
    fn on_phase_complete(&self, round: u64, phase: LoopPhase);

    /// Called once the plan for a round is known
    fn on_plan(&self, _round: u64, _items: &[WorkItem]) {}

    /// Called when a dispatched work item returns
    fn on_worker_complete(&self, _result: &WorkerResult) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl RoundProgressNotifier for NoProgress {
    fn on_phase_start(&self, _round: u64, _phase: LoopPhase, _total_tasks: usize) {}
    fn on_phase_complete(&self, _round: u64, _phase: LoopPhase) {}
}
