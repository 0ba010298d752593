//! Shared document state carried from round to round.

use serde::{Deserialize, Serialize};

/// The outline, the article and the current round number (Entity)
///
/// Write discipline, enforced by phase ordering rather than locks:
/// only the planner advances the round, only the aggregator replaces
/// `outline` and `article`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentState {
    round_number: u64,
    outline: String,
    article: String,
}

impl DocumentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn round_number(&self) -> u64 {
        self.round_number
    }

    pub fn outline(&self) -> &str {
        &self.outline
    }

    pub fn article(&self) -> &str {
        &self.article
    }

    /// Advance to the next round and return its number.
    pub fn begin_round(&mut self) -> u64 {
        self.round_number += 1;
        self.round_number
    }

    pub fn replace_outline(&mut self, outline: String) {
        self.outline = outline;
    }

    pub fn replace_article(&mut self, article: String) {
        self.article = article;
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            round_number: self.round_number,
            outline: self.outline.clone(),
            article: self.article.clone(),
        }
    }
}

/// Copy of the document state taken when a work item is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub round_number: u64,
    pub outline: String,
    pub article: String,
}
