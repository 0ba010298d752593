//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`] - domain-level errors
//! - [`request::Request`] - a validated user request to the council

pub mod error;
pub mod request;
