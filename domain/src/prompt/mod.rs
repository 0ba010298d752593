//! Prompt domain
//!
//! Templates for every oracle request: controller planning, outline and
//! article merging, the editorial checklist, and the worker skills.

mod template;

pub use template::PromptTemplate;
