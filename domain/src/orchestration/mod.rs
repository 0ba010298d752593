//! Writing loop orchestration domain
//!
//! The loop's phases and the value objects a finished run produces.

pub mod entities;
pub mod value_objects;
