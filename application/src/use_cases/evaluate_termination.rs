//! Evaluate Termination use case
//!
//! Runs the editorial checklist against the current document and reads the
//! verdict out of the reply.

use crate::ports::oracle::{Oracle, OracleError};
use scribe_domain::{
    ConversationHistory, DocumentState, PromptTemplate, TerminationReading, Verdict,
    classify_termination_reply,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Use case for the end-of-round termination check
pub struct EvaluateTerminationUseCase<O: Oracle + ?Sized> {
    oracle: Arc<O>,
}

impl<O: Oracle + ?Sized> EvaluateTerminationUseCase<O> {
    pub fn new(oracle: Arc<O>) -> Self {
        Self { oracle }
    }

    /// Ask the editor whether to keep editing.
    ///
    /// A reply containing neither marker stops the loop.
    pub async fn execute(
        &self,
        state: &DocumentState,
        history: &ConversationHistory,
    ) -> Result<Verdict, OracleError> {
        let prompt =
            PromptTemplate::termination_prompt(state.outline(), state.article(), &history.render());

        let response = self
            .oracle
            .ask(PromptTemplate::termination_system(), &prompt)
            .await?;
        debug!("Termination response: {}", response);

        let reading = classify_termination_reply(&response);
        if reading == TerminationReading::Ambiguous {
            warn!(
                "Termination reply for round {} has no verdict marker, stopping",
                state.round_number()
            );
        }

        Ok(reading.into())
    }
}
