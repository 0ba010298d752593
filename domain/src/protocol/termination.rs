//! Termination verdict parsing.
//!
//! The editor checklist must end with one of two phrases. Only the
//! "keep editing" marker matters: its presence anywhere in the reply,
//! including inside the checklist reasoning, means another round.

use serde::{Deserialize, Serialize};

/// Marker that asks for another round
pub const KEEP_EDITING: &str = "KEEP EDITING";

/// Marker that hands the article back to the requester
pub const RETURN_TO_REQUESTER: &str = "RETURN TO REQUESTING AGENT";

/// Binary outcome of a termination check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Continue,
    Stop,
}

/// Which markers a termination reply contains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReading {
    KeepEditing,
    ReturnToRequester,
    /// Neither marker is present
    Ambiguous,
}

impl From<TerminationReading> for Verdict {
    fn from(reading: TerminationReading) -> Self {
        match reading {
            TerminationReading::KeepEditing => Verdict::Continue,
            TerminationReading::ReturnToRequester | TerminationReading::Ambiguous => Verdict::Stop,
        }
    }
}

/// Classify a termination reply by the markers it contains.
pub fn classify_termination_reply(response: &str) -> TerminationReading {
    if response.contains(KEEP_EDITING) {
        TerminationReading::KeepEditing
    } else if response.contains(RETURN_TO_REQUESTER) {
        TerminationReading::ReturnToRequester
    } else {
        TerminationReading::Ambiguous
    }
}

/// Parse a termination reply into a verdict.
///
/// # Examples
///
/// ```
/// use scribe_domain::protocol::termination::{parse_termination_verdict, Verdict};
///
/// assert_eq!(parse_termination_verdict("- WORD COUNT: 900\nKEEP EDITING"), Verdict::Continue);
/// assert_eq!(parse_termination_verdict("RETURN TO REQUESTING AGENT"), Verdict::Stop);
/// assert_eq!(parse_termination_verdict("Looks fine to me."), Verdict::Stop);
/// ```
pub fn parse_termination_verdict(response: &str) -> Verdict {
    classify_termination_reply(response).into()
}
