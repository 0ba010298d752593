//! Orchestration domain entities

use serde::{Deserialize, Serialize};

/// Phase of the writing loop's state machine
///
/// `Planning → Dispatched → Aggregating → Evaluating → (Planning | Done)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopPhase {
    /// The controller decides which workers to invoke
    Planning,
    /// Work items run against their targets
    Dispatched,
    /// Candidate outlines and articles are merged into the document
    Aggregating,
    /// The editor checklist decides whether to keep editing
    Evaluating,
    /// Terminal state
    Done,
}

impl LoopPhase {
    pub fn as_str(&self) -> &str {
        match self {
            LoopPhase::Planning => "planning",
            LoopPhase::Dispatched => "dispatched",
            LoopPhase::Aggregating => "aggregating",
            LoopPhase::Evaluating => "evaluating",
            LoopPhase::Done => "done",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            LoopPhase::Planning => "Planning",
            LoopPhase::Dispatched => "Drafting",
            LoopPhase::Aggregating => "Merging",
            LoopPhase::Evaluating => "Editorial Check",
            LoopPhase::Done => "Done",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, LoopPhase::Done)
    }
}

impl std::fmt::Display for LoopPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
