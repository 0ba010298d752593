//! Writing session
//!
//! Owns the document and the conversation across user turns. Each turn
//! appends the request to the history, runs the loop on the shared
//! document, and appends the article when the council returned it.

use crate::ports::oracle::Oracle;
use crate::ports::progress::{NoProgress, RoundProgressNotifier};
use crate::ports::worker_dispatcher::WorkerDispatcher;
use crate::use_cases::run_writing::RunWritingUseCase;
use scribe_domain::{ConversationHistory, DocumentState, Request, TargetRegistry, WritingOutcome};
use tracing::debug;

/// A multi-turn writing conversation
pub struct WritingSession<O: Oracle + ?Sized + 'static, D: WorkerDispatcher + ?Sized + 'static> {
    use_case: RunWritingUseCase<O, D>,
    registry: TargetRegistry,
    state: DocumentState,
    history: ConversationHistory,
}

impl<O, D> WritingSession<O, D>
where
    O: Oracle + ?Sized + 'static,
    D: WorkerDispatcher + ?Sized + 'static,
{
    pub fn new(use_case: RunWritingUseCase<O, D>, registry: TargetRegistry) -> Self {
        Self {
            use_case,
            registry,
            state: DocumentState::new(),
            history: ConversationHistory::new(),
        }
    }

    pub fn state(&self) -> &DocumentState {
        &self.state
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    /// Run one user turn
    pub async fn submit(&mut self, request: Request) -> WritingOutcome {
        self.submit_with_progress(request, &NoProgress).await
    }

    /// Run one user turn with progress callbacks
    pub async fn submit_with_progress(
        &mut self,
        request: Request,
        progress: &dyn RoundProgressNotifier,
    ) -> WritingOutcome {
        self.history.push_user(request.into_content());

        let outcome = self
            .use_case
            .execute_with_progress(&mut self.state, &self.registry, &self.history, progress)
            .await;

        if outcome.status.is_finished() {
            self.history.push_agent(outcome.article.clone());
        } else {
            debug!(
                "Run ended with {:?}; article not added to the conversation",
                outcome.status
            );
        }

        outcome
    }

    /// Start over with an empty document and conversation
    pub fn reset(&mut self) {
        self.state = DocumentState::new();
        self.history = ConversationHistory::new();
    }
}
