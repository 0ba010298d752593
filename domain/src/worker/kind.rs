//! Worker kind - the closed set of contributions a worker can make.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What a worker produces, carried by every target and every result.
///
/// The aggregator routes results by this tag instead of by worker name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerKind {
    /// Produces a candidate outline (section headers in markdown)
    Outline,
    /// Produces a candidate article (section bodies in markdown)
    Article,
    /// Produces context notes that inform the next plan
    Context,
}

impl WorkerKind {
    pub const ALL: [WorkerKind; 3] = [
        WorkerKind::Outline,
        WorkerKind::Article,
        WorkerKind::Context,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerKind::Outline => "outline",
            WorkerKind::Article => "article",
            WorkerKind::Context => "context",
        }
    }

    /// Whether results of this kind are merged into the document state.
    pub fn is_mergeable(&self) -> bool {
        matches!(self, WorkerKind::Outline | WorkerKind::Article)
    }
}

impl std::fmt::Display for WorkerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkerKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "outline" => Ok(WorkerKind::Outline),
            "article" | "section" => Ok(WorkerKind::Article),
            "context" | "notes" => Ok(WorkerKind::Context),
            other => Err(DomainError::UnknownWorkerKind(other.to_string())),
        }
    }
}
