//! Request value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A writing request submitted by the user (Value Object)
///
/// Becomes a user message in the conversation history before a run starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    content: String,
}

impl Request {
    /// Try to create a new request, rejecting blank content
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::EmptyRequest);
        }
        Ok(Self { content })
    }

    /// Get the request content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}
