//! Skill-backed worker dispatcher

use super::skills::WorkerSkill;
use async_trait::async_trait;
use scribe_application::WorkerDispatcher;
use scribe_domain::{ConversationHistory, WorkItem, WorkerPayload, WorkerResult};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Routes each work item to the skill registered under its target name
#[derive(Default)]
pub struct SkillDispatcher {
    skills: HashMap<String, Arc<dyn WorkerSkill>>,
}

impl SkillDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skill(
        mut self,
        target_name: impl Into<String>,
        skill: Arc<dyn WorkerSkill>,
    ) -> Self {
        self.skills.insert(target_name.into(), skill);
        self
    }

    pub fn has_skill(&self, target_name: &str) -> bool {
        self.skills.contains_key(target_name)
    }
}

#[async_trait]
impl WorkerDispatcher for SkillDispatcher {
    async fn dispatch(&self, item: WorkItem, history: ConversationHistory) -> WorkerResult {
        let target = item.target();
        let round_number = item.round_number();

        let Some(skill) = self.skills.get(target.name()) else {
            warn!("No skill registered for target {}", target.name());
            return WorkerResult::failure(
                target.kind(),
                target.name(),
                round_number,
                item.instruction(),
                format!("no skill registered for target '{}'", target.name()),
            );
        };

        debug!("Dispatching {}", item.label());
        match skill.run(&item, &history).await {
            Ok(text) => WorkerResult::success(
                skill.kind(),
                target.name(),
                WorkerPayload {
                    round_number,
                    text,
                    instruction: item.instruction().to_string(),
                },
            ),
            Err(e) => WorkerResult::failure(
                skill.kind(),
                target.name(),
                round_number,
                item.instruction(),
                e.to_string(),
            ),
        }
    }
}
