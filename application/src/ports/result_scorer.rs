//! Result scoring port
//!
//! Assigns a relevance score to each worker result before aggregation.
//! Candidates are handed to the merge prompts in descending score order.

use scribe_domain::WorkerResult;

/// Scores worker results
pub trait ResultScorer: Send + Sync {
    fn score(&self, result: &WorkerResult) -> f64;
}

/// Scores 1.0 for an error-free result with text, 0.0 otherwise
pub struct BasicResultScorer;

impl ResultScorer for BasicResultScorer {
    fn score(&self, result: &WorkerResult) -> f64 {
        if !result.is_error() && !result.text().trim().is_empty() {
            1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_domain::{WorkerKind, WorkerPayload};

    fn payload(text: &str) -> WorkerPayload {
        WorkerPayload {
            round_number: 1,
            text: text.to_string(),
            instruction: "write".to_string(),
        }
    }

    #[test]
    fn test_success_scores_one() {
        let result = WorkerResult::success(WorkerKind::Article, "Article Writer", payload("Body"));
        assert_eq!(BasicResultScorer.score(&result), 1.0);
    }

    #[test]
    fn test_failure_scores_zero() {
        let result =
            WorkerResult::failure(WorkerKind::Outline, "Outline Writer", 1, "write", "boom");
        assert_eq!(BasicResultScorer.score(&result), 0.0);
    }

    #[test]
    fn test_blank_text_scores_zero() {
        let result = WorkerResult::success(WorkerKind::Context, "Research Notes", payload("  \n"));
        assert_eq!(BasicResultScorer.score(&result), 0.0);
    }
}
