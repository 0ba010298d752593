//! Delegation targets and the registry the planner chooses from.

use super::kind::WorkerKind;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A worker (or group of workers) the planner can delegate to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    name: String,
    description: String,
    kind: WorkerKind,
}

impl Target {
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: WorkerKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> WorkerKind {
        self.kind
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Ordered collection of delegation targets.
///
/// Names are unique; lookup is by exact name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRegistry {
    targets: Vec<Target>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target, rejecting empty or duplicate names.
    pub fn register(mut self, target: Target) -> Result<Self, DomainError> {
        if target.name.trim().is_empty() {
            return Err(DomainError::EmptyTargetName);
        }
        if self.find(&target.name).is_some() {
            return Err(DomainError::DuplicateTarget(target.name));
        }
        self.targets.push(target);
        Ok(self)
    }

    pub fn find(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// One `name: ..., description: ...` line per target, in registration order.
    pub fn describe(&self) -> String {
        self.targets
            .iter()
            .map(|t| format!("name: {}, description: {}", t.name, t.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
