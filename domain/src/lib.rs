//! Domain layer for scribe-council
//!
//! This crate contains the core types and pure logic of the writing loop.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Rounds
//!
//! A writing run is a sequence of rounds. Each round the controller plans
//! [`WorkItem`]s, workers return [`WorkerResult`]s, candidate outlines and
//! articles are merged into the [`DocumentState`], and an editorial
//! checklist yields a [`Verdict`].
//!
//! ## Protocols
//!
//! The oracle answers in free text. [`protocol`] turns those replies into
//! typed values, treating malformed lines as data rather than failures.

pub mod conversation;
pub mod core;
pub mod document;
pub mod orchestration;
pub mod prompt;
pub mod protocol;
pub mod worker;

// Re-export commonly used types
pub use conversation::{ConversationHistory, Message, Role};
pub use core::{error::DomainError, request::Request};
pub use document::{
    state::{DocumentState, StateSnapshot},
    work_item::{Decision, WorkItem},
};
pub use orchestration::{
    entities::LoopPhase,
    value_objects::{BudgetReason, LoopStatus, WritingOutcome},
};
pub use prompt::PromptTemplate;
pub use protocol::{
    decision::{
        DecisionBatch, DecisionParseError, RejectedLine, parse_decision_line, parse_decision_text,
    },
    termination::{
        KEEP_EDITING, RETURN_TO_REQUESTER, TerminationReading, Verdict,
        classify_termination_reply, parse_termination_verdict,
    },
};
pub use worker::{
    kind::WorkerKind,
    result::{WorkerPayload, WorkerResult},
    target::{Target, TargetRegistry},
};
