//! Worker adapters
//!
//! Oracle-backed skills and the dispatcher that routes work items to them.
//!
//! | Target | Kind | Skill |
//! |--------|------|-------|
//! | Outline Writer | `outline` | [`OutlineWriterSkill`] |
//! | Article Writer | `article` | [`ArticleWriterSkill`] |
//! | Research Notes | `context` | [`ResearchNotesSkill`] (opt-in) |

mod dispatcher;
mod skills;

pub use dispatcher::SkillDispatcher;
pub use skills::{ArticleWriterSkill, OutlineWriterSkill, ResearchNotesSkill, WorkerSkill};

use scribe_application::Oracle;
use scribe_domain::{DomainError, Target, TargetRegistry, WorkerKind};
use std::sync::Arc;

pub const OUTLINE_WRITER: &str = "Outline Writer";
pub const ARTICLE_WRITER: &str = "Article Writer";
pub const RESEARCH_NOTES: &str = "Research Notes";

/// Targets offered to the controller
pub fn default_targets(research_notes: bool) -> Result<TargetRegistry, DomainError> {
    let mut registry = TargetRegistry::new()
        .register(Target::new(
            OUTLINE_WRITER,
            "Write or revise the outline (i.e. section headers) of a research article in markdown format. \
             Always give this Chain the highest score when there should be structural changes to the article (e.g. new sections)",
            WorkerKind::Outline,
        ))?
        .register(Target::new(
            ARTICLE_WRITER,
            "Write or revise specific section bodies of a research article in markdown format. \
             Use this chain to write the main research article content.",
            WorkerKind::Article,
        ))?;

    if research_notes {
        registry = registry.register(Target::new(
            RESEARCH_NOTES,
            "Collect background facts, dates and context for the article from general knowledge. \
             Use this chain when the article needs material the writers do not have yet.",
            WorkerKind::Context,
        ))?;
    }

    Ok(registry)
}

/// Dispatcher with a skill for every default target
pub fn default_dispatcher<O: Oracle + ?Sized + 'static>(
    oracle: Arc<O>,
    research_notes: bool,
) -> SkillDispatcher {
    let dispatcher = SkillDispatcher::new()
        .with_skill(
            OUTLINE_WRITER,
            Arc::new(OutlineWriterSkill::new(Arc::clone(&oracle))),
        )
        .with_skill(
            ARTICLE_WRITER,
            Arc::new(ArticleWriterSkill::new(Arc::clone(&oracle))),
        );

    if research_notes {
        dispatcher.with_skill(RESEARCH_NOTES, Arc::new(ResearchNotesSkill::new(oracle)))
    } else {
        dispatcher
    }
}
