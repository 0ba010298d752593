//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Target name cannot be empty")]
    EmptyTargetName,

    #[error("Target already registered: {0}")]
    DuplicateTarget(String),

    #[error("Unknown worker kind: {0}")]
    UnknownWorkerKind(String),

    #[error("Request cannot be empty")]
    EmptyRequest,
}
