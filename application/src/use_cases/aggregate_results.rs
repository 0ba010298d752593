//! Aggregate Results use case
//!
//! Merges the outlines and articles produced during the current round into
//! the shared document state.
//!
//! | Step | Input | Effect |
//! |------|-------|--------|
//! | Select | all results | keep current-round, error-free results |
//! | Partition | selected results | outline / article / context groups |
//! | Outline merge | outline group (non-empty) | replaces `outline` |
//! | Article merge | article group (non-empty) | replaces `article`, prompt uses the new outline |
//!
//! A failed merge leaves its field untouched and marks the round degraded;
//! the other merge still runs.

use crate::ports::oracle::{Oracle, OracleError};
use scribe_domain::{ConversationHistory, DocumentState, PromptTemplate, WorkerKind, WorkerResult};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What happened during aggregation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregationReport {
    pub outline_candidates: usize,
    pub article_candidates: usize,
    /// Results dropped because they belong to another round
    pub stale_results: usize,
    /// Results dropped because the worker reported an error
    pub failed_results: usize,
    /// Context contributions, best score first
    pub context_notes: Vec<String>,
    pub outline_updated: bool,
    pub article_updated: bool,
    pub outline_error: Option<String>,
    pub article_error: Option<String>,
}

impl AggregationReport {
    /// Whether a merge call failed this round
    pub fn is_degraded(&self) -> bool {
        self.outline_error.is_some() || self.article_error.is_some()
    }
}

/// Use case for merging one round's worker results
pub struct AggregateResultsUseCase<O: Oracle + ?Sized> {
    oracle: Arc<O>,
}

impl<O: Oracle + ?Sized> AggregateResultsUseCase<O> {
    pub fn new(oracle: Arc<O>) -> Self {
        Self { oracle }
    }

    pub async fn execute(
        &self,
        state: &mut DocumentState,
        history: &ConversationHistory,
        results: Vec<WorkerResult>,
    ) -> AggregationReport {
        let mut report = AggregationReport::default();
        let round = state.round_number();

        let mut current = Vec::with_capacity(results.len());
        for result in results {
            if result.round_number() != round {
                debug!(
                    "Dropping stale result from {} (round {}, current {})",
                    result.source_name(),
                    result.round_number(),
                    round
                );
                report.stale_results += 1;
            } else if let Some(error) = result.error() {
                warn!("Worker {} failed: {}", result.source_name(), error);
                report.failed_results += 1;
            } else {
                current.push(result);
            }
        }

        // stable: equal scores keep arrival order
        current.sort_by(|a, b| b.score().total_cmp(&a.score()));

        let mut outlines = Vec::new();
        let mut articles = Vec::new();
        for result in current {
            match result.source_kind() {
                WorkerKind::Outline => outlines.push(result.into_text()),
                WorkerKind::Article => articles.push(result.into_text()),
                WorkerKind::Context => report.context_notes.push(result.into_text()),
            }
        }
        report.outline_candidates = outlines.len();
        report.article_candidates = articles.len();

        let conversation = history.render();

        if !outlines.is_empty() {
            match self.merge_outlines(state, &conversation, &outlines).await {
                Ok(outline) => {
                    state.replace_outline(outline);
                    report.outline_updated = true;
                    debug!("Outline: {}", state.outline());
                }
                Err(e) => {
                    warn!("Outline merge failed in round {}: {}", round, e);
                    report.outline_error = Some(e.to_string());
                }
            }
        }

        if !articles.is_empty() {
            match self.merge_articles(state, &conversation, &articles).await {
                Ok(article) => {
                    state.replace_article(article);
                    report.article_updated = true;
                    debug!("Article: {}", state.article());
                }
                Err(e) => {
                    warn!("Article merge failed in round {}: {}", round, e);
                    report.article_error = Some(e.to_string());
                }
            }
        }

        info!(
            "Round {} aggregated: {} outline(s), {} article(s), {} note(s), {} stale, {} failed",
            round,
            report.outline_candidates,
            report.article_candidates,
            report.context_notes.len(),
            report.stale_results,
            report.failed_results
        );

        report
    }

    async fn merge_outlines(
        &self,
        state: &DocumentState,
        conversation: &str,
        candidates: &[String],
    ) -> Result<String, OracleError> {
        let candidates: Vec<&str> = candidates.iter().map(String::as_str).collect();
        let prompt =
            PromptTemplate::outline_merge_prompt(conversation, state.outline(), &candidates);
        self.oracle
            .ask(PromptTemplate::outline_merge_system(), &prompt)
            .await
    }

    async fn merge_articles(
        &self,
        state: &DocumentState,
        conversation: &str,
        candidates: &[String],
    ) -> Result<String, OracleError> {
        let candidates: Vec<&str> = candidates.iter().map(String::as_str).collect();
        let prompt = PromptTemplate::article_merge_prompt(
            conversation,
            state.outline(),
            state.article(),
            &candidates,
        );
        self.oracle
            .ask(PromptTemplate::article_merge_system(), &prompt)
            .await
    }
}
