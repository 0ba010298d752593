//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for writing results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The article in a markdown fence, or the intermediate draft
    Text,
    /// The full outcome as JSON
    Json,
}

/// CLI arguments for scribe-council
#[derive(Parser, Debug)]
#[command(name = "scribe-council")]
#[command(
    author,
    version,
    about = "Writing council - a controller LLM delegates outline and article work to writer LLMs"
)]
#[command(long_about = r#"
Scribe Council writes research articles in rounds.

Each round has four phases:
1. Planning:    the controller decides which writers to invoke, with a score out of 10
2. Drafting:    the selected writers run in parallel
3. Merging:     candidate outlines, then candidate articles, are merged into the document
4. Editorial:   a checklist decides whether to keep editing or return the article

Configuration files are loaded from (in priority order):
1. SCRIBE_* environment variables (e.g. SCRIBE_BUDGET__SECONDS=600)
2. --config <path>     Explicit config file
3. ./scribe.toml       Project-level config
4. ~/.config/scribe-council/config.toml   Global config

Example:
  scribe-council "Tell me about the history of box manufacturing."
  scribe-council --top-k 1 --budget-seconds 300 "Write about paper mills"
  scribe-council                     # interactive mode
"#)]
pub struct Cli {
    /// The writing request (starts interactive mode when omitted)
    pub request: Option<String>,

    /// Maximum work items per round
    #[arg(long, value_name = "N")]
    pub top_k: Option<usize>,

    /// Decisions must score above this to be planned
    #[arg(long, value_name = "SCORE", allow_negative_numbers = true)]
    pub threshold: Option<i64>,

    /// Maximum rounds per request
    #[arg(long, value_name = "N")]
    pub max_rounds: Option<usize>,

    /// Wall-clock budget per request, in seconds
    #[arg(long, value_name = "SECONDS")]
    pub budget_seconds: Option<u64>,

    /// Model used for the controller, merges and writers
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Offer the Research Notes worker to the controller
    #[arg(long)]
    pub research_notes: bool,

    /// Append a JSONL transcript of every run to this file
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
