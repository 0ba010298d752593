//! Application layer for scribe-council
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ExecutionParams, PlannerParams};
pub use ports::{
    oracle::{Oracle, OracleError},
    progress::{NoProgress, RoundProgressNotifier},
    result_scorer::{BasicResultScorer, ResultScorer},
    transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger},
    worker_dispatcher::WorkerDispatcher,
};
pub use use_cases::aggregate_results::{AggregateResultsUseCase, AggregationReport};
pub use use_cases::evaluate_termination::EvaluateTerminationUseCase;
pub use use_cases::plan_round::{PlanRoundUseCase, select_decisions};
pub use use_cases::run_writing::RunWritingUseCase;
pub use use_cases::writing_session::WritingSession;
