//! Text protocols spoken with the oracle.
//!
//! These functions turn free-form oracle replies into typed values. They
//! are pure domain logic: no I/O, no logging, just text pattern matching.
//!
//! | Function | Protocol | Shape |
//! |----------|----------|-------|
//! | [`decision::parse_decision_text`] | Controller plan | `target;score;instruction` per line |
//! | [`termination::parse_termination_verdict`] | Editor checklist | `KEEP EDITING` / `RETURN TO REQUESTING AGENT` |

pub mod decision;
pub mod termination;
