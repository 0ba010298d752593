//! Infrastructure layer for scribe-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod oracle;
pub mod workers;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigIssue, ConfigLoader, DEFAULT_PROMPT, FileConfig, FileOracleConfig,
    FileOutputConfig, FileReplConfig, Severity,
};
pub use logging::JsonlTranscriptLogger;
pub use oracle::{OpenAiError, OpenAiOracle, OpenAiSettings};
pub use workers::{SkillDispatcher, WorkerSkill, default_dispatcher, default_targets};
