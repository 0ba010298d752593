//! Orchestration value objects - immutable result types for writing runs.
//!
//! - [`LoopStatus`] - why the loop reached `Done`
//! - [`BudgetReason`] - which budget ran out
//! - [`WritingOutcome`] - final article plus run statistics

use serde::{Deserialize, Serialize};

/// Which part of the budget was exhausted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetReason {
    /// The maximum number of rounds was reached
    MaxRounds,
    /// The wall-clock deadline passed
    Deadline,
    /// The caller cancelled the run
    Cancelled,
}

impl BudgetReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetReason::MaxRounds => "round limit reached",
            BudgetReason::Deadline => "time budget exceeded",
            BudgetReason::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for BudgetReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a writing run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoopStatus {
    /// The editor checklist returned the article
    Completed,
    /// The controller produced an empty plan
    NothingToDo,
    /// A budget ran out before the editor returned the article
    BudgetExhausted { reason: BudgetReason },
    /// Too many rounds in a row failed to reach the oracle
    Degraded { consecutive: usize },
}

impl LoopStatus {
    /// Whether the article was returned by the council itself
    pub fn is_finished(&self) -> bool {
        matches!(self, LoopStatus::Completed | LoopStatus::NothingToDo)
    }
}

/// Result of one writing run (Value Object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WritingOutcome {
    pub status: LoopStatus,
    /// The article at the end of the run (intermediate when not finished)
    pub article: String,
    pub outline: String,
    /// Rounds started during this run
    pub rounds: usize,
    /// Last round number of the shared document state
    pub final_round_number: u64,
    /// Rounds in which at least one oracle call failed
    pub degraded_rounds: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_finished() {
        assert!(LoopStatus::Completed.is_finished());
        assert!(LoopStatus::NothingToDo.is_finished());
        assert!(
            !LoopStatus::BudgetExhausted {
                reason: BudgetReason::Deadline
            }
            .is_finished()
        );
        assert!(!LoopStatus::Degraded { consecutive: 3 }.is_finished());
    }

    #[test]
    fn test_status_serializes_with_tag() {
        let json = serde_json::to_value(LoopStatus::BudgetExhausted {
            reason: BudgetReason::MaxRounds,
        })
        .unwrap();
        assert_eq!(json["status"], "budget_exhausted");
        assert_eq!(json["reason"], "max_rounds");
    }
}
