//! Worker results produced by dispatched work items.

use super::kind::WorkerKind;
use serde::{Deserialize, Serialize};

/// Payload returned by a worker.
///
/// `text` is an outline, an article, or opaque context depending on the
/// result's [`WorkerKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerPayload {
    /// Round number copied from the work item's state snapshot
    pub round_number: u64,
    pub text: String,
    /// Instruction the worker was given
    pub instruction: String,
}

/// Output of one dispatched work item (Value Object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerResult {
    source_kind: WorkerKind,
    source_name: String,
    payload: WorkerPayload,
    score: f64,
    error: Option<String>,
}

impl WorkerResult {
    pub fn success(
        source_kind: WorkerKind,
        source_name: impl Into<String>,
        payload: WorkerPayload,
    ) -> Self {
        Self {
            source_kind,
            source_name: source_name.into(),
            payload,
            score: 0.0,
            error: None,
        }
    }

    /// A failed dispatch, tagged with an error instead of raising.
    pub fn failure(
        source_kind: WorkerKind,
        source_name: impl Into<String>,
        round_number: u64,
        instruction: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            source_kind,
            source_name: source_name.into(),
            payload: WorkerPayload {
                round_number,
                text: String::new(),
                instruction: instruction.into(),
            },
            score: 0.0,
            error: Some(error.into()),
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    pub fn source_kind(&self) -> WorkerKind {
        self.source_kind
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn payload(&self) -> &WorkerPayload {
        &self.payload
    }

    pub fn round_number(&self) -> u64 {
        self.payload.round_number
    }

    pub fn text(&self) -> &str {
        &self.payload.text
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn into_text(self) -> String {
        self.payload.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_has_no_error() {
        let result = WorkerResult::success(
            WorkerKind::Outline,
            "Outline Writer",
            WorkerPayload {
                round_number: 2,
                text: "# A".to_string(),
                instruction: "add intro".to_string(),
            },
        )
        .with_score(1.0);

        assert!(!result.is_error());
        assert_eq!(result.round_number(), 2);
        assert_eq!(result.score(), 1.0);
        assert_eq!(result.text(), "# A");
    }

    #[test]
    fn test_failure_keeps_round_and_error() {
        let result = WorkerResult::failure(
            WorkerKind::Article,
            "Article Writer",
            3,
            "expand history",
            "oracle timed out",
        );

        assert!(result.is_error());
        assert_eq!(result.error(), Some("oracle timed out"));
        assert_eq!(result.round_number(), 3);
        assert!(result.text().is_empty());
    }
}
