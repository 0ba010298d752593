//! Oracle-backed worker skills

use async_trait::async_trait;
use scribe_application::{Oracle, OracleError};
use scribe_domain::{ConversationHistory, PromptTemplate, WorkItem, WorkerKind};
use std::sync::Arc;

/// A unit of work a target can perform
#[async_trait]
pub trait WorkerSkill: Send + Sync {
    /// What this skill contributes
    fn kind(&self) -> WorkerKind;

    /// Produce the skill's text for one work item
    async fn run(&self, item: &WorkItem, history: &ConversationHistory)
    -> Result<String, OracleError>;
}

/// Writes or revises the article outline
pub struct OutlineWriterSkill<O: Oracle + ?Sized> {
    oracle: Arc<O>,
}

impl<O: Oracle + ?Sized> OutlineWriterSkill<O> {
    pub fn new(oracle: Arc<O>) -> Self {
        Self { oracle }
    }
}

#[async_trait]
impl<O: Oracle + ?Sized> WorkerSkill for OutlineWriterSkill<O> {
    fn kind(&self) -> WorkerKind {
        WorkerKind::Outline
    }

    async fn run(
        &self,
        item: &WorkItem,
        history: &ConversationHistory,
    ) -> Result<String, OracleError> {
        let prompt = PromptTemplate::outline_writer_prompt(
            &history.render(),
            &item.state_snapshot().outline,
            item.instruction(),
        );
        self.oracle
            .ask(PromptTemplate::outline_writer_system(), &prompt)
            .await
    }
}

/// Writes or revises article section bodies
pub struct ArticleWriterSkill<O: Oracle + ?Sized> {
    oracle: Arc<O>,
}

impl<O: Oracle + ?Sized> ArticleWriterSkill<O> {
    pub fn new(oracle: Arc<O>) -> Self {
        Self { oracle }
    }
}

#[async_trait]
impl<O: Oracle + ?Sized> WorkerSkill for ArticleWriterSkill<O> {
    fn kind(&self) -> WorkerKind {
        WorkerKind::Article
    }

    async fn run(
        &self,
        item: &WorkItem,
        history: &ConversationHistory,
    ) -> Result<String, OracleError> {
        let snapshot = item.state_snapshot();
        let prompt = PromptTemplate::article_writer_prompt(
            &history.render(),
            &snapshot.outline,
            &snapshot.article,
            item.instruction(),
        );
        self.oracle
            .ask(PromptTemplate::article_writer_system(), &prompt)
            .await
    }
}

/// Collects background notes for the next planning round
pub struct ResearchNotesSkill<O: Oracle + ?Sized> {
    oracle: Arc<O>,
}

impl<O: Oracle + ?Sized> ResearchNotesSkill<O> {
    pub fn new(oracle: Arc<O>) -> Self {
        Self { oracle }
    }
}

#[async_trait]
impl<O: Oracle + ?Sized> WorkerSkill for ResearchNotesSkill<O> {
    fn kind(&self) -> WorkerKind {
        WorkerKind::Context
    }

    async fn run(
        &self,
        item: &WorkItem,
        history: &ConversationHistory,
    ) -> Result<String, OracleError> {
        let prompt = PromptTemplate::research_notes_prompt(
            &history.render(),
            &item.state_snapshot().outline,
            item.instruction(),
        );
        self.oracle
            .ask(PromptTemplate::research_notes_system(), &prompt)
            .await
    }
}
