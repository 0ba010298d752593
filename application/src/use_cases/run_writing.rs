//! Run Writing use case
//!
//! Drives the round loop to completion:
//!
//! ```text
//! Planning → Dispatched → Aggregating → Evaluating → (Planning | Done)
//! ```
//!
//! The budget is checked before every phase and raced against every
//! suspension point. Oracle failures degrade a round instead of aborting
//! the run; too many degraded rounds in a row end it.

use crate::config::ExecutionParams;
use crate::ports::oracle::Oracle;
use crate::ports::progress::{NoProgress, RoundProgressNotifier};
use crate::ports::result_scorer::{BasicResultScorer, ResultScorer};
use crate::ports::transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
use crate::ports::worker_dispatcher::WorkerDispatcher;
use crate::use_cases::aggregate_results::AggregateResultsUseCase;
use crate::use_cases::evaluate_termination::EvaluateTerminationUseCase;
use crate::use_cases::plan_round::PlanRoundUseCase;
use crate::use_cases::shared::RoundBudget;
use scribe_domain::{
    ConversationHistory, DocumentState, LoopPhase, LoopStatus, TargetRegistry, Verdict, WorkItem,
    WorkerResult, WritingOutcome,
};
use serde_json::json;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Degradation bookkeeping for one run
#[derive(Debug, Default)]
struct DegradationTracker {
    total: usize,
    consecutive: usize,
}

impl DegradationTracker {
    /// Record the end of a round. Returns the consecutive count when the
    /// limit is reached; a limit of 0 never stops the loop.
    fn end_round(&mut self, degraded: bool, limit: usize) -> Option<usize> {
        if !degraded {
            self.consecutive = 0;
            return None;
        }
        self.total += 1;
        self.consecutive += 1;
        (limit > 0 && self.consecutive >= limit).then_some(self.consecutive)
    }
}

/// Results of one dispatch phase
struct DispatchedRound {
    results: Vec<WorkerResult>,
    /// Work items whose task panicked or was aborted before returning
    lost: usize,
}

/// Use case for running the writing loop
pub struct RunWritingUseCase<O: Oracle + ?Sized + 'static, D: WorkerDispatcher + ?Sized + 'static> {
    oracle: Arc<O>,
    dispatcher: Arc<D>,
    scorer: Arc<dyn ResultScorer>,
    transcript: Arc<dyn TranscriptLogger>,
    cancellation_token: Option<CancellationToken>,
    params: ExecutionParams,
}

impl<O, D> RunWritingUseCase<O, D>
where
    O: Oracle + ?Sized + 'static,
    D: WorkerDispatcher + ?Sized + 'static,
{
    pub fn new(oracle: Arc<O>, dispatcher: Arc<D>, params: ExecutionParams) -> Self {
        Self {
            oracle,
            dispatcher,
            scorer: Arc::new(BasicResultScorer),
            transcript: Arc::new(NoTranscriptLogger),
            cancellation_token: None,
            params,
        }
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn with_scorer(mut self, scorer: Arc<dyn ResultScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_transcript(mut self, transcript: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = transcript;
        self
    }

    pub fn params(&self) -> &ExecutionParams {
        &self.params
    }

    /// Execute the loop with default (no-op) progress
    pub async fn execute(
        &self,
        state: &mut DocumentState,
        registry: &TargetRegistry,
        history: &ConversationHistory,
    ) -> WritingOutcome {
        self.execute_with_progress(state, registry, history, &NoProgress)
            .await
    }

    /// Execute the loop with progress callbacks
    pub async fn execute_with_progress(
        &self,
        state: &mut DocumentState,
        registry: &TargetRegistry,
        history: &ConversationHistory,
        progress: &dyn RoundProgressNotifier,
    ) -> WritingOutcome {
        let budget = RoundBudget::start(&self.params, self.cancellation_token.clone());
        let planner = PlanRoundUseCase::new(Arc::clone(&self.oracle), self.params.planner.clone());
        let aggregator = AggregateResultsUseCase::new(Arc::clone(&self.oracle));
        let evaluator = EvaluateTerminationUseCase::new(Arc::clone(&self.oracle));

        let limit = self.params.max_consecutive_degraded;
        let mut degradation = DegradationTracker::default();
        let mut rounds = 0usize;
        let mut notes: Vec<String> = Vec::new();

        info!(
            "Starting writing loop (max {} rounds, top_k {})",
            self.params.max_rounds, self.params.planner.top_k
        );

        let status = loop {
            if let Some(reason) = budget.before_round(rounds) {
                break LoopStatus::BudgetExhausted { reason };
            }
            rounds += 1;

            // Phase 1: Planning
            let upcoming = state.round_number() + 1;
            progress.on_phase_start(upcoming, LoopPhase::Planning, 0);
            let planned = match budget
                .guard(planner.execute(state, registry, history, &notes))
                .await
            {
                Ok(planned) => planned,
                Err(reason) => break LoopStatus::BudgetExhausted { reason },
            };
            let round = state.round_number();
            progress.on_phase_complete(round, LoopPhase::Planning);

            let items = match planned {
                Ok(items) => items,
                Err(e) => {
                    warn!("Planning failed in round {}: {}", round, e);
                    self.log_failure(round, LoopPhase::Planning, &e.to_string());
                    if let Some(consecutive) = degradation.end_round(true, limit) {
                        break LoopStatus::Degraded { consecutive };
                    }
                    continue;
                }
            };

            self.log_plan(round, &items);
            progress.on_plan(round, &items);

            if items.is_empty() {
                info!("Round {}: empty plan, nothing left to do", round);
                break LoopStatus::NothingToDo;
            }

            // Phase 2: Dispatched
            if let Some(reason) = budget.before_phase() {
                break LoopStatus::BudgetExhausted { reason };
            }
            progress.on_phase_start(round, LoopPhase::Dispatched, items.len());
            let dispatched = match budget
                .guard(self.dispatch_all(items, history, progress))
                .await
            {
                Ok(dispatched) => dispatched,
                Err(reason) => break LoopStatus::BudgetExhausted { reason },
            };
            let DispatchedRound { results, lost } = dispatched;
            progress.on_phase_complete(round, LoopPhase::Dispatched);

            // Phase 3: Aggregating
            if let Some(reason) = budget.before_phase() {
                break LoopStatus::BudgetExhausted { reason };
            }
            progress.on_phase_start(round, LoopPhase::Aggregating, results.len());
            let mut report = match budget
                .guard(aggregator.execute(state, history, results))
                .await
            {
                Ok(report) => report,
                Err(reason) => break LoopStatus::BudgetExhausted { reason },
            };
            progress.on_phase_complete(round, LoopPhase::Aggregating);
            report.failed_results += lost;
            self.transcript.log(TranscriptEvent::new(
                "aggregation",
                json!({
                    "round": round,
                    "report": report,
                }),
            ));

            let mut round_degraded = report.is_degraded() || lost > 0;
            notes = report.context_notes;

            // Phase 4: Evaluating
            if let Some(reason) = budget.before_phase() {
                break LoopStatus::BudgetExhausted { reason };
            }
            progress.on_phase_start(round, LoopPhase::Evaluating, 0);
            let evaluated = match budget.guard(evaluator.execute(state, history)).await {
                Ok(evaluated) => evaluated,
                Err(reason) => break LoopStatus::BudgetExhausted { reason },
            };
            progress.on_phase_complete(round, LoopPhase::Evaluating);

            let verdict = match evaluated {
                Ok(verdict) => {
                    self.transcript.log(TranscriptEvent::new(
                        "verdict",
                        json!({
                            "round": round,
                            "verdict": verdict,
                        }),
                    ));
                    verdict
                }
                Err(e) => {
                    warn!("Termination check failed in round {}: {}", round, e);
                    self.log_failure(round, LoopPhase::Evaluating, &e.to_string());
                    round_degraded = true;
                    Verdict::Continue
                }
            };

            if let Some(consecutive) = degradation.end_round(round_degraded, limit) {
                break LoopStatus::Degraded { consecutive };
            }
            if verdict == Verdict::Stop {
                info!("Round {}: article returned to requester", round);
                break LoopStatus::Completed;
            }
        };

        match status {
            LoopStatus::BudgetExhausted { reason } => {
                warn!("Writing loop stopped after {} round(s): {}", rounds, reason)
            }
            LoopStatus::Degraded { consecutive } => warn!(
                "Writing loop stopped after {} consecutive degraded round(s)",
                consecutive
            ),
            _ => info!("Writing loop finished after {} round(s)", rounds),
        }

        let outcome = WritingOutcome {
            status,
            article: state.article().to_string(),
            outline: state.outline().to_string(),
            rounds,
            final_round_number: state.round_number(),
            degraded_rounds: degradation.total,
        };

        self.transcript.log(TranscriptEvent::new(
            "run_finished",
            json!({
                "status": outcome.status,
                "rounds": outcome.rounds,
                "final_round_number": outcome.final_round_number,
                "degraded_rounds": outcome.degraded_rounds,
            }),
        ));

        outcome
    }

    /// Dispatch every work item in parallel and score the results
    async fn dispatch_all(
        &self,
        items: Vec<WorkItem>,
        history: &ConversationHistory,
        progress: &dyn RoundProgressNotifier,
    ) -> DispatchedRound {
        let mut join_set = JoinSet::new();

        for item in items {
            let dispatcher = Arc::clone(&self.dispatcher);
            let history = history.clone();
            join_set.spawn(async move { dispatcher.dispatch(item, history).await });
        }

        let mut results = Vec::new();
        let mut lost = 0;
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(result) => {
                    let score = self.scorer.score(&result);
                    let result = result.with_score(score);
                    if let Some(error) = result.error() {
                        warn!("Worker {} failed: {}", result.source_name(), error);
                    } else {
                        info!(
                            "Worker {} responded (score {:.2})",
                            result.source_name(),
                            score
                        );
                    }
                    self.transcript.log(TranscriptEvent::new(
                        "worker_result",
                        json!({
                            "round": result.round_number(),
                            "source": result.source_name(),
                            "kind": result.source_kind(),
                            "score": score,
                            "error": result.error(),
                            "text": result.text(),
                        }),
                    ));
                    progress.on_worker_complete(&result);
                    results.push(result);
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                    lost += 1;
                }
            }
        }

        DispatchedRound { results, lost }
    }

    fn log_plan(&self, round: u64, items: &[WorkItem]) {
        let items: Vec<_> = items
            .iter()
            .map(|item| {
                json!({
                    "target": item.target().name(),
                    "priority": item.priority(),
                    "instruction": item.instruction(),
                })
            })
            .collect();
        self.transcript.log(TranscriptEvent::new(
            "plan",
            json!({
                "round": round,
                "items": items,
            }),
        ));
    }

    fn log_failure(&self, round: u64, phase: LoopPhase, error: &str) {
        self.transcript.log(TranscriptEvent::new(
            "oracle_failure",
            json!({
                "round": round,
                "phase": phase,
                "error": error,
            }),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::oracle::OracleError;
    use crate::use_cases::test_support::{EchoDispatcher, ScriptedOracle, writing_registry};
    use async_trait::async_trait;
    use scribe_domain::BudgetReason;
    use std::sync::Mutex;
    use std::time::Duration;

    struct RecordingTranscript {
        events: Mutex<Vec<&'static str>>,
    }

    impl TranscriptLogger for RecordingTranscript {
        fn log(&self, event: TranscriptEvent) {
            self.events.lock().unwrap().push(event.event_type);
        }
    }

    /// Cancels the run from inside a dispatch and never returns
    struct CancellingDispatcher {
        token: CancellationToken,
    }

    #[async_trait]
    impl WorkerDispatcher for CancellingDispatcher {
        async fn dispatch(&self, _item: WorkItem, _history: ConversationHistory) -> WorkerResult {
            self.token.cancel();
            std::future::pending().await
        }
    }

    struct PanickingDispatcher;

    #[async_trait]
    impl WorkerDispatcher for PanickingDispatcher {
        async fn dispatch(&self, item: WorkItem, _history: ConversationHistory) -> WorkerResult {
            panic!("worker crashed on {}", item.label());
        }
    }

    fn use_case(
        oracle: &Arc<ScriptedOracle>,
        dispatcher: &Arc<EchoDispatcher>,
        params: ExecutionParams,
    ) -> RunWritingUseCase<ScriptedOracle, EchoDispatcher> {
        RunWritingUseCase::new(Arc::clone(oracle), Arc::clone(dispatcher), params)
    }

    fn history() -> ConversationHistory {
        let mut history = ConversationHistory::new();
        history.push_user("Tell me about the history of box manufacturing.");
        history
    }

    #[tokio::test]
    async fn test_empty_plan_returns_empty_article() {
        let oracle = Arc::new(ScriptedOracle::replying(&[""]));
        let dispatcher = Arc::new(EchoDispatcher::new());
        let mut state = DocumentState::new();

        let outcome = use_case(&oracle, &dispatcher, ExecutionParams::default())
            .execute(&mut state, &writing_registry(), &ConversationHistory::new())
            .await;

        assert_eq!(outcome.status, LoopStatus::NothingToDo);
        assert_eq!(outcome.article, "");
        assert_eq!(outcome.rounds, 1);
        assert_eq!(oracle.calls().len(), 1);
        assert!(dispatcher.dispatched().is_empty());
    }

    #[tokio::test]
    async fn test_two_rounds_to_completion() {
        let oracle = Arc::new(ScriptedOracle::replying(&[
            "Outline Writer;8;draft the outline\nArticle Writer;6;write the intro",
            "# Origins\n# Industrialization",
            "Boxes began as wooden crates.",
            "- WORD COUNT: 5\nKEEP EDITING",
            "Article Writer;7;expand industrialization",
            "Boxes began as wooden crates. Then came corrugated board.",
            "RETURN TO REQUESTING AGENT",
        ]));
        let dispatcher = Arc::new(EchoDispatcher::new());
        let mut state = DocumentState::new();

        let outcome = use_case(&oracle, &dispatcher, ExecutionParams::default())
            .execute(&mut state, &writing_registry(), &history())
            .await;

        assert_eq!(outcome.status, LoopStatus::Completed);
        assert_eq!(outcome.rounds, 2);
        assert_eq!(outcome.final_round_number, 2);
        assert_eq!(outcome.degraded_rounds, 0);
        assert_eq!(outcome.outline, "# Origins\n# Industrialization");
        assert_eq!(
            outcome.article,
            "Boxes began as wooden crates. Then came corrugated board."
        );

        let mut rounds: Vec<_> = dispatcher
            .dispatched()
            .iter()
            .map(|item| item.round_number())
            .collect();
        rounds.sort();
        assert_eq!(rounds, vec![1, 1, 2]);

        // worker output of round 2 reaches the article merge
        let calls = oracle.calls();
        assert_eq!(calls.len(), 7);
        assert!(calls[5]
            .prompt
            .contains("article draft for round 2: expand industrialization"));
    }

    #[tokio::test]
    async fn test_round_limit_stops_without_more_calls() {
        let oracle = Arc::new(ScriptedOracle::replying(&[
            "Article Writer;5;write",
            "Body 1",
            "KEEP EDITING",
            "Article Writer;5;expand",
            "Body 2",
            "KEEP EDITING",
        ]));
        let dispatcher = Arc::new(EchoDispatcher::new());
        let mut state = DocumentState::new();

        let outcome = use_case(
            &oracle,
            &dispatcher,
            ExecutionParams::default().with_max_rounds(2),
        )
        .execute(&mut state, &writing_registry(), &history())
        .await;

        assert_eq!(
            outcome.status,
            LoopStatus::BudgetExhausted {
                reason: BudgetReason::MaxRounds
            }
        );
        assert_eq!(outcome.article, "Body 2");
        assert_eq!(oracle.calls().len(), 6);
    }

    #[tokio::test]
    async fn test_zero_time_budget_makes_no_calls() {
        let oracle = Arc::new(ScriptedOracle::replying(&["Article Writer;5;write"]));
        let dispatcher = Arc::new(EchoDispatcher::new());
        let mut state = DocumentState::new();
        state.replace_article("Existing".to_string());

        let outcome = use_case(
            &oracle,
            &dispatcher,
            ExecutionParams::default().with_time_budget(Some(Duration::ZERO)),
        )
        .execute(&mut state, &writing_registry(), &history())
        .await;

        assert_eq!(
            outcome.status,
            LoopStatus::BudgetExhausted {
                reason: BudgetReason::Deadline
            }
        );
        assert_eq!(outcome.rounds, 0);
        assert_eq!(outcome.article, "Existing");
        assert!(oracle.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_during_dispatch() {
        let token = CancellationToken::new();
        let oracle = Arc::new(ScriptedOracle::replying(&["Article Writer;5;write"]));
        let dispatcher = Arc::new(CancellingDispatcher {
            token: token.clone(),
        });
        let mut state = DocumentState::new();

        let outcome = RunWritingUseCase::new(
            Arc::clone(&oracle),
            dispatcher,
            ExecutionParams::default(),
        )
        .with_cancellation(token)
        .execute(&mut state, &writing_registry(), &history())
        .await;

        assert_eq!(
            outcome.status,
            LoopStatus::BudgetExhausted {
                reason: BudgetReason::Cancelled
            }
        );
        assert_eq!(oracle.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_consecutive_planning_failures_degrade() {
        // an empty script fails every call
        let oracle = Arc::new(ScriptedOracle::new(vec![]));
        let dispatcher = Arc::new(EchoDispatcher::new());
        let mut state = DocumentState::new();

        let outcome = use_case(&oracle, &dispatcher, ExecutionParams::default())
            .execute(&mut state, &writing_registry(), &history())
            .await;

        assert_eq!(outcome.status, LoopStatus::Degraded { consecutive: 3 });
        assert_eq!(outcome.rounds, 3);
        assert_eq!(outcome.degraded_rounds, 3);
        assert_eq!(outcome.final_round_number, 3);
        assert_eq!(oracle.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_panicking_worker_degrades_round() {
        let oracle = Arc::new(ScriptedOracle::replying(&[
            "Article Writer;5;write",
            "RETURN TO REQUESTING AGENT",
        ]));
        let mut state = DocumentState::new();

        let outcome = RunWritingUseCase::new(
            Arc::clone(&oracle),
            Arc::new(PanickingDispatcher),
            ExecutionParams::default(),
        )
        .execute(&mut state, &writing_registry(), &history())
        .await;

        assert_eq!(outcome.status, LoopStatus::Completed);
        assert_eq!(outcome.degraded_rounds, 1);
        assert_eq!(outcome.article, "");
        // planner and termination check only, nothing to merge
        assert_eq!(oracle.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_termination_failure_moves_to_next_round() {
        let oracle = Arc::new(ScriptedOracle::new(vec![
            Ok("Article Writer;5;write".to_string()),
            Ok("Body".to_string()),
            Err(OracleError::Timeout),
            Ok(String::new()),
        ]));
        let dispatcher = Arc::new(EchoDispatcher::new());
        let mut state = DocumentState::new();

        let outcome = use_case(&oracle, &dispatcher, ExecutionParams::default())
            .execute(&mut state, &writing_registry(), &history())
            .await;

        assert_eq!(outcome.status, LoopStatus::NothingToDo);
        assert_eq!(outcome.rounds, 2);
        assert_eq!(outcome.degraded_rounds, 1);
        assert_eq!(outcome.article, "Body");
    }

    #[tokio::test]
    async fn test_healthy_round_resets_degradation() {
        let oracle = Arc::new(ScriptedOracle::new(vec![
            Err(OracleError::Timeout),
            Err(OracleError::Timeout),
            Ok("Article Writer;5;write".to_string()),
            Ok("Body".to_string()),
            Ok("KEEP EDITING".to_string()),
            Err(OracleError::Timeout),
            Err(OracleError::Timeout),
            Ok(String::new()),
        ]));
        let dispatcher = Arc::new(EchoDispatcher::new());
        let mut state = DocumentState::new();

        let outcome = use_case(&oracle, &dispatcher, ExecutionParams::default())
            .execute(&mut state, &writing_registry(), &history())
            .await;

        assert_eq!(outcome.status, LoopStatus::NothingToDo);
        assert_eq!(outcome.degraded_rounds, 4);
        assert_eq!(outcome.rounds, 6);
    }

    #[tokio::test]
    async fn test_context_notes_reach_next_plan() {
        let oracle = Arc::new(ScriptedOracle::replying(&[
            "Research Notes;7;find key dates",
            "KEEP EDITING",
            "",
        ]));
        let dispatcher = Arc::new(EchoDispatcher::new());
        let mut state = DocumentState::new();

        let outcome = use_case(&oracle, &dispatcher, ExecutionParams::default())
            .execute(&mut state, &writing_registry(), &history())
            .await;

        assert_eq!(outcome.status, LoopStatus::NothingToDo);
        let calls = oracle.calls();
        // no merge calls for context-only rounds
        assert_eq!(calls.len(), 3);
        assert!(calls[2]
            .prompt
            .contains("context draft for round 1: find key dates"));
        assert!(!calls[0].prompt.contains("RESEARCH NOTES"));
    }

    #[tokio::test]
    async fn test_transcript_events() {
        let oracle = Arc::new(ScriptedOracle::replying(&[
            "Article Writer;5;write",
            "Body",
            "RETURN TO REQUESTING AGENT",
        ]));
        let dispatcher = Arc::new(EchoDispatcher::new());
        let transcript = Arc::new(RecordingTranscript {
            events: Mutex::new(Vec::new()),
        });
        let mut state = DocumentState::new();

        use_case(&oracle, &dispatcher, ExecutionParams::default())
            .with_transcript(transcript.clone())
            .execute(&mut state, &writing_registry(), &history())
            .await;

        assert_eq!(
            *transcript.events.lock().unwrap(),
            vec![
                "plan",
                "worker_result",
                "aggregation",
                "verdict",
                "run_finished"
            ]
        );
    }

    #[test]
    fn test_degradation_limit_zero_never_stops() {
        let mut tracker = DegradationTracker::default();
        for _ in 0..10 {
            assert_eq!(tracker.end_round(true, 0), None);
        }
        assert_eq!(tracker.total, 10);
    }
}
