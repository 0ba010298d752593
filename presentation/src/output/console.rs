//! Console output formatter for writing outcomes

use colored::Colorize;
use scribe_domain::{LoopStatus, WritingOutcome};

/// Formats writing outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format an outcome for the terminal
    ///
    /// A returned article is printed inside a markdown fence. Otherwise the
    /// reason is explained and the intermediate outline and article follow.
    pub fn format(outcome: &WritingOutcome) -> String {
        match outcome.status {
            LoopStatus::Completed | LoopStatus::NothingToDo => Self::fenced(&outcome.article),
            LoopStatus::BudgetExhausted { reason } => {
                let mut output = format!(
                    "{} ({}). Please consider increasing the budget for future runs.\n",
                    "Execution stopped due to exceeded budget".yellow().bold(),
                    reason
                );
                output.push_str(&Self::intermediate(outcome));
                output
            }
            LoopStatus::Degraded { consecutive } => {
                let mut output = format!(
                    "{} after {} failed round(s) in a row. Check the oracle connection.\n",
                    "Execution stopped".red().bold(),
                    consecutive
                );
                output.push_str(&Self::intermediate(outcome));
                output
            }
        }
    }

    /// Format as JSON
    pub fn format_json(outcome: &WritingOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// One-line run statistics
    pub fn format_summary(outcome: &WritingOutcome) -> String {
        let mut summary = format!(
            "{} round(s), document at round {}",
            outcome.rounds, outcome.final_round_number
        );
        if outcome.degraded_rounds > 0 {
            summary.push_str(&format!(", {} degraded", outcome.degraded_rounds));
        }
        summary.dimmed().to_string()
    }

    fn fenced(article: &str) -> String {
        format!("\n```markdown\n{}\n```\n", article)
    }

    fn intermediate(outcome: &WritingOutcome) -> String {
        let mut output = format!("{}\n", "Intermediate results:".cyan().bold());
        output.push_str(&format!(
            "{}\n{}\n",
            Self::section_header("Outline:"),
            outcome.outline
        ));
        output.push_str(&format!("\n{}\n", "-".repeat(60)));
        output.push_str(&format!(
            "{}\n{}\n",
            Self::section_header("Article:"),
            outcome.article
        ));
        output
    }

    fn section_header(title: &str) -> String {
        format!("\n{}", title.cyan().bold())
    }
}
