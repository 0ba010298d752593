//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section is optional; missing fields take their defaults.

mod controller;
mod oracle;
mod output;
mod repl;
mod workers;

pub use controller::{FileBudgetConfig, FileControllerConfig};
pub use oracle::FileOracleConfig;
pub use output::{FileLoggingConfig, FileOutputConfig};
pub use repl::{DEFAULT_PROMPT, FileReplConfig};
pub use workers::FileWorkersConfig;

use scribe_application::ExecutionParams;
use serde::{Deserialize, Serialize};

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The configuration cannot work at all.
    Error,
    /// The configuration works but may not behave as expected.
    Warning,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted path of the offending field, e.g. `controller.top_k`
    pub field: &'static str,
    pub message: String,
}

impl ConfigIssue {
    fn warning(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field,
            message: message.into(),
        }
    }

    fn error(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field,
            message: message.into(),
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Plan selection
    pub controller: FileControllerConfig,
    /// Per-turn limits
    pub budget: FileBudgetConfig,
    /// Chat-completions endpoint
    pub oracle: FileOracleConfig,
    /// Optional workers
    pub workers: FileWorkersConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Log file settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Loop parameters from the `[controller]` and `[budget]` sections
    pub fn execution_params(&self) -> ExecutionParams {
        self.budget.to_execution_params(&self.controller)
    }

    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.controller.top_k == 0 {
            issues.push(ConfigIssue::warning(
                "controller.top_k",
                "controller.top_k is 0: every plan will be empty",
            ));
        }
        if self.controller.response_threshold >= 10 {
            issues.push(ConfigIssue::warning(
                "controller.response_threshold",
                format!(
                    "controller.response_threshold is {}: scores go up to 10, so none will pass",
                    self.controller.response_threshold
                ),
            ));
        }
        if self.budget.max_rounds == 0 {
            issues.push(ConfigIssue::warning(
                "budget.max_rounds",
                "budget.max_rounds is 0: no round will run",
            ));
        }
        if self.budget.seconds == Some(0) {
            issues.push(ConfigIssue::warning(
                "budget.seconds",
                "budget.seconds is 0: every turn ends before the first round",
            ));
        }
        if self.oracle.model.trim().is_empty() {
            issues.push(ConfigIssue::error("oracle.model", "oracle.model is empty"));
        }
        if self.oracle.base_url.trim().is_empty() {
            issues.push(ConfigIssue::error("oracle.base_url", "oracle.base_url is empty"));
        }
        if self.repl.default_prompt.trim().is_empty() {
            issues.push(ConfigIssue::warning(
                "repl.default_prompt",
                "repl.default_prompt is empty: an empty input line writes nothing",
            ));
        }
        if let Some(temperature) = self.oracle.temperature
            && !(0.0..=2.0).contains(&temperature)
        {
            issues.push(ConfigIssue::warning(
                "oracle.temperature",
                format!("oracle.temperature {temperature} is outside 0.0..=2.0"),
            ));
        }

        issues
    }

    /// Check whether any issues are errors (i.e. fatal).
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[controller]
response_threshold = 4
top_k = 2

[budget]
seconds = 600
max_rounds = 6

[oracle]
model = "gpt-4o"
base_url = "http://localhost:8000/v1"
temperature = 0.3

[workers]
research_notes = true

[output]
color = false
transcript = "runs/transcript.jsonl"

[repl]
show_progress = false
default_prompt = "Tell me about paper mills."

[logging]
directory = "logs"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let params = config.execution_params();
        assert_eq!(params.planner.response_threshold, 4);
        assert_eq!(params.planner.top_k, 2);
        assert_eq!(params.max_rounds, 6);
        assert_eq!(params.time_budget, Some(Duration::from_secs(600)));
        assert_eq!(params.max_consecutive_degraded, 3);
        assert_eq!(config.oracle.model, "gpt-4o");
        assert_eq!(config.oracle.api_key_env, "OPENAI_API_KEY");
        assert!(config.workers.research_notes);
        assert!(!config.output.color);
        assert_eq!(
            config.output.transcript,
            Some(PathBuf::from("runs/transcript.jsonl"))
        );
        assert!(!config.repl.show_progress);
        assert_eq!(config.repl.default_prompt, "Tell me about paper mills.");
        assert_eq!(config.logging.directory, Some(PathBuf::from("logs")));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[controller]\ntop_k = 1\n").unwrap();
        assert_eq!(config.controller.top_k, 1);
        assert_eq!(config.controller.response_threshold, 0);
        assert_eq!(config.budget, FileBudgetConfig::default());
        assert_eq!(config.repl.default_prompt, DEFAULT_PROMPT);
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_validate_reports_issues() {
        let mut config = FileConfig::default();
        config.controller.top_k = 0;
        config.budget.max_rounds = 0;
        config.oracle.model = " ".to_string();

        let issues = config.validate();
        let fields: Vec<_> = issues.iter().map(|i| i.field).collect();
        assert_eq!(
            fields,
            vec!["controller.top_k", "budget.max_rounds", "oracle.model"]
        );
        assert!(FileConfig::has_errors(&issues));
    }

    #[test]
    fn test_warnings_are_not_fatal() {
        let mut config = FileConfig::default();
        config.budget.seconds = Some(0);
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(!FileConfig::has_errors(&issues));
    }

    #[test]
    fn test_empty_default_prompt_warns() {
        let mut config = FileConfig::default();
        config.repl.default_prompt = "  ".to_string();

        let issues = config.validate();

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "repl.default_prompt");
        assert_eq!(issues[0].severity, Severity::Warning);
    }
}
