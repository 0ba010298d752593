//! Workers: what they are, how they are registered, what they return.

pub mod kind;
pub mod result;
pub mod target;
