//! The document being written and the work delegated against it.

pub mod state;
pub mod work_item;
