//! Planner decisions and the work items built from them.

use super::state::StateSnapshot;
use crate::worker::target::Target;
use serde::{Deserialize, Serialize};

/// One validated `target;score;instruction` line from the planner's reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub target: Target,
    pub priority: i64,
    pub instruction: String,
}

impl Decision {
    pub fn new(target: Target, priority: i64, instruction: impl Into<String>) -> Self {
        Self {
            target,
            priority,
            instruction: instruction.into(),
        }
    }

    /// Stamp the decision with a state snapshot.
    pub fn into_work_item(self, snapshot: StateSnapshot) -> WorkItem {
        WorkItem {
            target: self.target,
            priority: self.priority,
            instruction: self.instruction,
            state_snapshot: snapshot,
        }
    }
}

/// Immutable unit of delegated work for one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    target: Target,
    priority: i64,
    instruction: String,
    state_snapshot: StateSnapshot,
}

impl WorkItem {
    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn priority(&self) -> i64 {
        self.priority
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn state_snapshot(&self) -> &StateSnapshot {
        &self.state_snapshot
    }

    pub fn round_number(&self) -> u64 {
        self.state_snapshot.round_number
    }

    /// `"<target>: <instruction>"`, used in logs and progress output.
    pub fn label(&self) -> String {
        format!("{}: {}", self.target.name(), self.instruction)
    }
}
