//! Controller decision parsing.
//!
//! The planner asks the oracle for one decision per line, formatted as
//! `{target name};{integer score};{instruction}`. Malformed lines are
//! routine data, not crashes: each one becomes a [`RejectedLine`] and the
//! remaining lines are still parsed.

use crate::document::work_item::Decision;
use crate::worker::target::TargetRegistry;
use thiserror::Error;

/// Field separator of the decision protocol
pub const DECISION_SEPARATOR: char = ';';

/// Why a decision line was discarded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecisionParseError {
    #[error("expected `target;score;instruction`, found {found} field(s)")]
    MissingFields { found: usize },

    #[error("unknown target: {0}")]
    UnknownTarget(String),

    #[error("score is not an integer: {0}")]
    InvalidScore(String),
}

/// A line that failed to parse, kept for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    pub line: String,
    pub error: DecisionParseError,
}

/// Result of parsing a full controller reply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecisionBatch {
    /// Successfully parsed decisions, in reply order
    pub accepted: Vec<Decision>,
    /// Lines that were discarded, in reply order
    pub rejected: Vec<RejectedLine>,
}

/// Parse one decision line against the target registry.
///
/// Only the first two separators split fields, so the instruction may
/// itself contain `;`. Target name and score are trimmed before matching.
///
/// # Examples
///
/// ```
/// use scribe_domain::protocol::decision::parse_decision_line;
/// use scribe_domain::worker::kind::WorkerKind;
/// use scribe_domain::worker::target::{Target, TargetRegistry};
///
/// let registry = TargetRegistry::new()
///     .register(Target::new("Outline Writer", "outlines", WorkerKind::Outline))
///     .unwrap();
///
/// let decision = parse_decision_line("Outline Writer;8;expand intro", &registry).unwrap();
/// assert_eq!(decision.priority, 8);
/// assert_eq!(decision.instruction, "expand intro");
///
/// assert!(parse_decision_line("Outline Writer;high;expand intro", &registry).is_err());
/// ```
pub fn parse_decision_line(
    line: &str,
    registry: &TargetRegistry,
) -> Result<Decision, DecisionParseError> {
    let fields: Vec<&str> = line.splitn(3, DECISION_SEPARATOR).collect();
    let [name, score, instruction] = fields.as_slice() else {
        return Err(DecisionParseError::MissingFields {
            found: fields.len(),
        });
    };

    let name = name.trim();
    let target = registry
        .find(name)
        .ok_or_else(|| DecisionParseError::UnknownTarget(name.to_string()))?;

    let score = score.trim();
    let priority = score
        .parse::<i64>()
        .map_err(|_| DecisionParseError::InvalidScore(score.to_string()))?;

    Ok(Decision::new(target.clone(), priority, instruction.trim()))
}

/// Parse a full controller reply.
///
/// The reply is split on line breaks, empty lines are dropped, and every
/// remaining line is parsed independently.
pub fn parse_decision_text(text: &str, registry: &TargetRegistry) -> DecisionBatch {
    let mut batch = DecisionBatch::default();

    for line in text.lines().filter(|l| !l.is_empty()) {
        match parse_decision_line(line, registry) {
            Ok(decision) => batch.accepted.push(decision),
            Err(error) => batch.rejected.push(RejectedLine {
                line: line.to_string(),
                error,
            }),
        }
    }

    batch
}
