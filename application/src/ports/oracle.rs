//! Oracle port
//!
//! Defines the interface for the text-completion service consulted for
//! planning, merging and termination decisions.

use async_trait::async_trait;
use scribe_domain::Message;
use thiserror::Error;

/// Errors that can occur during oracle calls
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Text-completion service
///
/// Calls suspend until the full response is available and have no effect
/// on the document state. Retry policy, if any, belongs to the adapter.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Complete a conversation under the given system prompt
    async fn complete(
        &self,
        system_prompt: &str,
        conversation: &[Message],
    ) -> Result<String, OracleError>;

    /// Send a single user prompt under the given system prompt
    async fn ask(&self, system_prompt: &str, prompt: &str) -> Result<String, OracleError> {
        self.complete(system_prompt, &[Message::user(prompt)]).await
    }
}
