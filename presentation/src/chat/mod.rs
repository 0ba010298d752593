//! Interactive writing module
//!
//! Provides a line-editor based REPL that keeps one document across requests.

mod repl;

pub use repl::ChatRepl;
