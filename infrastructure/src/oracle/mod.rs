//! Oracle adapters
//!
//! Implements the application's [`Oracle`](scribe_application::Oracle) port
//! over HTTP.

pub mod error;
pub mod openai;

pub use error::OpenAiError;
pub use openai::{OpenAiOracle, OpenAiSettings};
