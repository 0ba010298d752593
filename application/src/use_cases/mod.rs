//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod aggregate_results;
pub mod evaluate_termination;
pub mod plan_round;
pub mod run_writing;
pub(crate) mod shared;
#[cfg(test)]
pub(crate) mod test_support;
pub mod writing_session;
