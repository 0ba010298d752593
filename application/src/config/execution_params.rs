//! Execution parameters - writing loop control.
//!
//! [`PlannerParams`] controls how the controller's decisions become a plan;
//! [`ExecutionParams`] bounds the writing loop in
//! [`RunWritingUseCase`](crate::use_cases::run_writing::RunWritingUseCase).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Plan selection parameters.
///
/// Decisions with `priority <= response_threshold` are dropped, the rest
/// are ranked by priority and truncated to `top_k`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerParams {
    /// Minimum score (exclusive) a decision needs to be kept.
    pub response_threshold: i64,
    /// Maximum number of work items per round.
    pub top_k: usize,
}

impl Default for PlannerParams {
    fn default() -> Self {
        Self {
            response_threshold: 0,
            top_k: 5,
        }
    }
}

impl PlannerParams {
    pub fn with_response_threshold(mut self, threshold: i64) -> Self {
        self.response_threshold = threshold;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}

/// Writing loop control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Plan selection.
    pub planner: PlannerParams,
    /// Maximum number of rounds per run.
    pub max_rounds: usize,
    /// Wall-clock budget per run.
    pub time_budget: Option<Duration>,
    /// Stop after this many degraded rounds in a row.
    pub max_consecutive_degraded: usize,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            planner: PlannerParams::default(),
            max_rounds: 10,
            time_budget: None,
            max_consecutive_degraded: 3,
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_planner(mut self, planner: PlannerParams) -> Self {
        self.planner = planner;
        self
    }

    pub fn with_max_rounds(mut self, max: usize) -> Self {
        self.max_rounds = max;
        self
    }

    pub fn with_time_budget(mut self, budget: Option<Duration>) -> Self {
        self.time_budget = budget;
        self
    }

    pub fn with_max_consecutive_degraded(mut self, max: usize) -> Self {
        self.max_consecutive_degraded = max;
        self
    }
}
