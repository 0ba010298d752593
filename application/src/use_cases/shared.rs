//! Shared utilities for use cases.
//!
//! Contains the round budget checked before every phase of the writing loop.

use crate::config::ExecutionParams;
use scribe_domain::BudgetReason;
use std::future::Future;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Budget for one writing run: round limit, deadline and cancellation.
pub(crate) struct RoundBudget {
    max_rounds: usize,
    deadline: Option<Instant>,
    cancellation_token: Option<CancellationToken>,
}

impl RoundBudget {
    /// Start the clock for a new run.
    pub(crate) fn start(
        params: &ExecutionParams,
        cancellation_token: Option<CancellationToken>,
    ) -> Self {
        Self {
            max_rounds: params.max_rounds,
            // an unrepresentable deadline means no deadline
            deadline: params
                .time_budget
                .and_then(|budget| Instant::now().checked_add(budget)),
            cancellation_token,
        }
    }

    /// Check before starting a new round.
    pub(crate) fn before_round(&self, rounds_started: usize) -> Option<BudgetReason> {
        if rounds_started >= self.max_rounds {
            return Some(BudgetReason::MaxRounds);
        }
        self.before_phase()
    }

    /// Check before entering any phase.
    pub(crate) fn before_phase(&self) -> Option<BudgetReason> {
        if let Some(token) = &self.cancellation_token
            && token.is_cancelled()
        {
            return Some(BudgetReason::Cancelled);
        }
        if let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            return Some(BudgetReason::Deadline);
        }
        None
    }

    /// Resolve once the deadline passes or the run is cancelled.
    pub(crate) async fn exhausted(&self) -> BudgetReason {
        let cancelled = async {
            match &self.cancellation_token {
                Some(token) => token.cancelled().await,
                None => std::future::pending().await,
            }
        };
        let deadline = async {
            match self.deadline {
                Some(deadline) => {
                    tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await
                }
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => BudgetReason::Cancelled,
            _ = deadline => BudgetReason::Deadline,
        }
    }

    /// Run `future` unless the budget runs out first.
    ///
    /// The future is dropped on exhaustion; in-flight oracle calls and
    /// worker tasks are abandoned.
    pub(crate) async fn guard<F: Future>(&self, future: F) -> Result<F::Output, BudgetReason> {
        tokio::select! {
            biased;
            reason = self.exhausted() => Err(reason),
            output = future => Ok(output),
        }
    }
}
