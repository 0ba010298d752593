//! Application-level configuration.
//!
//! - [`PlannerParams`] - plan selection (threshold, top-k)
//! - [`ExecutionParams`] - writing loop control (rounds, time budget, degradation limit)

pub mod execution_params;

pub use execution_params::{ExecutionParams, PlannerParams};
