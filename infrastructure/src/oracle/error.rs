//! Error types for the OpenAI-compatible oracle

use scribe_application::OracleError;
use thiserror::Error;

/// Result type alias for OpenAI oracle operations
pub type Result<T> = std::result::Result<T, OpenAiError>;

/// Errors that can occur when talking to a chat-completions endpoint
#[derive(Error, Debug)]
pub enum OpenAiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No API key: set ${0} or [oracle] api_key")]
    MissingApiKey(String),

    #[error("Authentication failed (HTTP {status}): {body}")]
    Unauthorized { status: u16, body: String },

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response contained no choices")]
    EmptyChoices,
}

impl OpenAiError {
    /// Classify a non-success HTTP status
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => OpenAiError::Unauthorized { status, body },
            429 => OpenAiError::RateLimited(body),
            _ => OpenAiError::Status { status, body },
        }
    }
}

impl From<OpenAiError> for OracleError {
    fn from(err: OpenAiError) -> Self {
        match err {
            OpenAiError::Http(e) if e.is_timeout() => OracleError::Timeout,
            OpenAiError::Http(e) if e.is_connect() => OracleError::ConnectionError(e.to_string()),
            OpenAiError::Http(e) if e.is_decode() => OracleError::InvalidResponse(e.to_string()),
            OpenAiError::Http(e) => OracleError::RequestFailed(e.to_string()),
            e @ (OpenAiError::MissingApiKey(_) | OpenAiError::Unauthorized { .. }) => {
                OracleError::Authentication(e.to_string())
            }
            e @ (OpenAiError::RateLimited(_) | OpenAiError::Status { .. }) => {
                OracleError::RequestFailed(e.to_string())
            }
            e @ OpenAiError::EmptyChoices => OracleError::InvalidResponse(e.to_string()),
        }
    }
}
