//! REPL configuration from TOML (`[repl]` section)

use serde::{Deserialize, Serialize};

pub const DEFAULT_PROMPT: &str = "Tell me about the history of box manufacturing.";

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show progress indicators
    pub show_progress: bool,
    /// Path to history file
    pub history_file: Option<String>,
    /// Request used when the input line is empty
    pub default_prompt: String,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
            default_prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}
