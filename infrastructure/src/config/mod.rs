//! Configuration file loading for scribe-council
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `SCRIBE_<SECTION>__<KEY>` (e.g. `SCRIBE_BUDGET__SECONDS=600`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./scribe.toml` or `./.scribe.toml`
//! 4. Global: `$XDG_CONFIG_HOME/scribe-council/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, DEFAULT_PROMPT, FileBudgetConfig, FileConfig, FileControllerConfig,
    FileLoggingConfig, FileOracleConfig, FileOutputConfig, FileReplConfig, FileWorkersConfig,
    Severity,
};
pub use loader::ConfigLoader;

use thiserror::Error;

/// Errors raised while turning configuration into running adapters
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("No API key found: set ${env} or [oracle] api_key")]
    MissingApiKey { env: String },
}
