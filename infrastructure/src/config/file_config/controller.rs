//! Loop control configuration from TOML (`[controller]` and `[budget]` sections)

use scribe_application::{ExecutionParams, PlannerParams};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw controller configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileControllerConfig {
    /// Decisions must score above this to be planned
    pub response_threshold: i64,
    /// Maximum work items per round
    pub top_k: usize,
}

impl Default for FileControllerConfig {
    fn default() -> Self {
        Self {
            response_threshold: 0,
            top_k: 3,
        }
    }
}

impl FileControllerConfig {
    pub fn to_planner_params(&self) -> PlannerParams {
        PlannerParams::default()
            .with_response_threshold(self.response_threshold)
            .with_top_k(self.top_k)
    }
}

/// Raw budget configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBudgetConfig {
    /// Wall-clock seconds per user turn (unlimited when unset)
    pub seconds: Option<u64>,
    pub max_rounds: usize,
    pub max_consecutive_degraded: usize,
}

impl Default for FileBudgetConfig {
    fn default() -> Self {
        let params = ExecutionParams::default();
        Self {
            seconds: None,
            max_rounds: params.max_rounds,
            max_consecutive_degraded: params.max_consecutive_degraded,
        }
    }
}

impl FileBudgetConfig {
    /// Combine with the controller section into loop parameters
    pub fn to_execution_params(&self, controller: &FileControllerConfig) -> ExecutionParams {
        ExecutionParams::default()
            .with_planner(controller.to_planner_params())
            .with_max_rounds(self.max_rounds)
            .with_time_budget(self.seconds.map(Duration::from_secs))
            .with_max_consecutive_degraded(self.max_consecutive_degraded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_interactive_program() {
        let params =
            FileBudgetConfig::default().to_execution_params(&FileControllerConfig::default());
        assert_eq!(params.planner.top_k, 3);
        assert_eq!(params.planner.response_threshold, 0);
        assert_eq!(params.max_rounds, 10);
        assert_eq!(params.max_consecutive_degraded, 3);
        assert!(params.time_budget.is_none());
    }

    #[test]
    fn test_seconds_become_time_budget() {
        let budget = FileBudgetConfig {
            seconds: Some(90),
            ..Default::default()
        };
        let params = budget.to_execution_params(&FileControllerConfig::default());
        assert_eq!(params.time_budget, Some(Duration::from_secs(90)));
    }
}
