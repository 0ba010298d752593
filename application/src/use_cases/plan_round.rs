//! Plan Round use case
//!
//! Asks the controller oracle which workers to invoke next and turns its
//! reply into a bounded, ranked list of work items.

use crate::config::PlannerParams;
use crate::ports::oracle::{Oracle, OracleError};
use scribe_domain::{
    ConversationHistory, Decision, DocumentState, PromptTemplate, TargetRegistry, WorkItem,
    parse_decision_text,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Keep decisions scoring above the threshold, best first, at most `top_k`.
///
/// The sort is stable: equal priorities keep the oracle's order.
pub fn select_decisions(mut decisions: Vec<Decision>, params: &PlannerParams) -> Vec<Decision> {
    decisions.retain(|d| d.priority > params.response_threshold);
    decisions.sort_by(|a, b| b.priority.cmp(&a.priority));
    decisions.truncate(params.top_k);
    decisions
}

/// Use case for planning one round
pub struct PlanRoundUseCase<O: Oracle + ?Sized> {
    oracle: Arc<O>,
    params: PlannerParams,
}

impl<O: Oracle + ?Sized> PlanRoundUseCase<O> {
    pub fn new(oracle: Arc<O>, params: PlannerParams) -> Self {
        Self { oracle, params }
    }

    pub fn params(&self) -> &PlannerParams {
        &self.params
    }

    /// Plan the next round.
    ///
    /// Advances `state` to the next round before anything else, so the
    /// round number moves even when the oracle fails or the plan is empty.
    /// An empty plan is a normal outcome.
    pub async fn execute(
        &self,
        state: &mut DocumentState,
        registry: &TargetRegistry,
        history: &ConversationHistory,
        notes: &[String],
    ) -> Result<Vec<WorkItem>, OracleError> {
        let round = state.begin_round();
        info!("Planning round {}", round);

        let prompt = PromptTemplate::planner_prompt(
            &registry.describe(),
            &history.render(),
            state.outline(),
            state.article(),
            notes,
        );

        let response = self
            .oracle
            .ask(PromptTemplate::planner_system(), &prompt)
            .await?;
        debug!("Controller response: {}", response);

        let batch = parse_decision_text(&response, registry);
        for rejected in &batch.rejected {
            warn!(
                "Controller parsing error: {}. Line: {}",
                rejected.error, rejected.line
            );
        }

        let parsed = batch.accepted.len();
        let selected = select_decisions(batch.accepted, &self.params);
        info!(
            "Round {}: {} decision(s) parsed, {} selected",
            round,
            parsed,
            selected.len()
        );

        let snapshot = state.snapshot();
        Ok(selected
            .into_iter()
            .map(|decision| decision.into_work_item(snapshot.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{ScriptedOracle, writing_registry};
    use scribe_domain::{Target, WorkerKind};

    fn decision(name: &str, priority: i64) -> Decision {
        Decision::new(
            Target::new(name, "", WorkerKind::Article),
            priority,
            format!("{name} at {priority}"),
        )
    }

    fn planner(
        oracle: Arc<ScriptedOracle>,
        threshold: i64,
        top_k: usize,
    ) -> PlanRoundUseCase<ScriptedOracle> {
        PlanRoundUseCase::new(
            oracle,
            PlannerParams::default()
                .with_response_threshold(threshold)
                .with_top_k(top_k),
        )
    }

    // ==================== select_decisions Tests ====================

    #[test]
    fn test_select_filters_sorts_truncates() {
        let decisions = vec![
            decision("a", 3),
            decision("b", 9),
            decision("c", 0),
            decision("d", 6),
            decision("e", 9),
        ];

        let selected = select_decisions(decisions, &PlannerParams::default().with_top_k(3));

        let names: Vec<_> = selected.iter().map(|d| d.target.name()).collect();
        assert_eq!(names, vec!["b", "e", "d"]);
    }

    #[test]
    fn test_select_threshold_is_exclusive() {
        let selected = select_decisions(
            vec![decision("a", 5), decision("b", 6)],
            &PlannerParams::default().with_response_threshold(5),
        );
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].priority, 6);
    }

    #[test]
    fn test_select_invariants() {
        let decisions: Vec<_> = (-3..12).map(|p| decision("x", p)).collect();
        let params = PlannerParams::default().with_response_threshold(2).with_top_k(4);

        let selected = select_decisions(decisions, &params);

        assert!(selected.len() <= params.top_k);
        assert!(selected.iter().all(|d| d.priority > params.response_threshold));
        assert!(selected.windows(2).all(|w| w[0].priority >= w[1].priority));
    }

    // ==================== execute Tests ====================

    #[tokio::test]
    async fn test_top_one_keeps_highest_priority() {
        let oracle = Arc::new(ScriptedOracle::replying(&[
            "Outline Writer;8;expand intro\nArticle Writer;3;fix typo",
        ]));
        let mut state = DocumentState::new();

        let items = planner(oracle, 0, 1)
            .execute(&mut state, &writing_registry(), &ConversationHistory::new(), &[])
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].target().name(), "Outline Writer");
        assert_eq!(items[0].priority(), 8);
        assert_eq!(items[0].instruction(), "expand intro");
    }

    #[tokio::test]
    async fn test_nothing_above_threshold_is_empty_plan() {
        let oracle = Arc::new(ScriptedOracle::replying(&[
            "Outline Writer;5;a\nArticle Writer;2;b",
        ]));
        let mut state = DocumentState::new();

        let items = planner(oracle, 5, 3)
            .execute(&mut state, &writing_registry(), &ConversationHistory::new(), &[])
            .await
            .unwrap();

        assert!(items.is_empty());
        assert_eq!(state.round_number(), 1);
    }

    #[tokio::test]
    async fn test_round_number_advances_every_call() {
        let oracle = Arc::new(ScriptedOracle::new(vec![
            Ok("Outline Writer;8;a".to_string()),
            Ok("nothing useful".to_string()),
            Err(OracleError::Timeout),
        ]));
        let planner = planner(oracle, 0, 5);
        let registry = writing_registry();
        let history = ConversationHistory::new();
        let mut state = DocumentState::new();

        for expected in 1..=3u64 {
            let _ = planner.execute(&mut state, &registry, &history, &[]).await;
            assert_eq!(state.round_number(), expected);
        }
    }

    #[tokio::test]
    async fn test_work_items_snapshot_current_state() {
        let oracle = Arc::new(ScriptedOracle::replying(&[
            "Article Writer;7;write body\nOutline Writer;7;add section",
        ]));
        let mut state = DocumentState::new();
        state.replace_outline("# Intro".to_string());
        state.replace_article("Draft".to_string());

        let items = planner(oracle, 0, 5)
            .execute(&mut state, &writing_registry(), &ConversationHistory::new(), &[])
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
        // equal priorities keep reply order
        assert_eq!(items[0].target().name(), "Article Writer");
        for item in &items {
            assert_eq!(item.round_number(), 1);
            assert_eq!(item.state_snapshot().outline, "# Intro");
            assert_eq!(item.state_snapshot().article, "Draft");
        }
    }

    #[tokio::test]
    async fn test_prompt_carries_targets_history_and_notes() {
        let oracle = Arc::new(ScriptedOracle::replying(&[""]));
        let mut history = ConversationHistory::new();
        history.push_user("Write about corrugated boxes");
        let notes = vec!["- patented in 1871".to_string()];
        let mut state = DocumentState::new();

        planner(Arc::clone(&oracle), 0, 5)
            .execute(&mut state, &writing_registry(), &history, &notes)
            .await
            .unwrap();

        let calls = oracle.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system, PromptTemplate::planner_system());
        assert!(calls[0].prompt.contains("name: Outline Writer"));
        assert!(calls[0].prompt.contains("user: Write about corrugated boxes"));
        assert!(calls[0].prompt.contains("- patented in 1871"));
    }

    #[tokio::test]
    async fn test_oracle_failure_propagates() {
        let oracle = Arc::new(ScriptedOracle::new(vec![Err(OracleError::Timeout)]));
        let mut state = DocumentState::new();

        let err = planner(oracle, 0, 5)
            .execute(&mut state, &writing_registry(), &ConversationHistory::new(), &[])
            .await
            .unwrap_err();

        assert_eq!(err, OracleError::Timeout);
        assert!(state.outline().is_empty());
    }
}
