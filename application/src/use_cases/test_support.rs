//! Test doubles shared by the use case tests.

use crate::ports::oracle::{Oracle, OracleError};
use crate::ports::worker_dispatcher::WorkerDispatcher;
use async_trait::async_trait;
use scribe_domain::{
    ConversationHistory, Message, Target, TargetRegistry, WorkItem, WorkerKind, WorkerPayload,
    WorkerResult,
};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A recorded oracle request
#[derive(Debug, Clone)]
pub(crate) struct OracleCall {
    pub system: String,
    pub prompt: String,
}

/// Oracle answering from a script and capturing every prompt
pub(crate) struct ScriptedOracle {
    replies: Mutex<VecDeque<Result<String, OracleError>>>,
    calls: Mutex<Vec<OracleCall>>,
}

impl ScriptedOracle {
    pub fn new(replies: Vec<Result<String, OracleError>>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from(replies)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(replies: &[&str]) -> Self {
        Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn calls(&self) -> Vec<OracleCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Oracle for ScriptedOracle {
    async fn complete(
        &self,
        system_prompt: &str,
        conversation: &[Message],
    ) -> Result<String, OracleError> {
        self.calls.lock().unwrap().push(OracleCall {
            system: system_prompt.to_string(),
            prompt: conversation
                .iter()
                .map(|m| m.content.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(OracleError::Other("No more replies".to_string())))
    }
}

/// Dispatcher that echoes `"<kind> draft for round N: <instruction>"`
pub(crate) struct EchoDispatcher {
    pub dispatched: Mutex<Vec<WorkItem>>,
}

impl EchoDispatcher {
    pub fn new() -> Self {
        Self {
            dispatched: Mutex::new(Vec::new()),
        }
    }

    pub fn dispatched(&self) -> Vec<WorkItem> {
        self.dispatched.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkerDispatcher for EchoDispatcher {
    async fn dispatch(&self, item: WorkItem, _history: ConversationHistory) -> WorkerResult {
        self.dispatched.lock().unwrap().push(item.clone());
        let kind = item.target().kind();
        WorkerResult::success(
            kind,
            item.target().name(),
            WorkerPayload {
                round_number: item.round_number(),
                text: format!(
                    "{} draft for round {}: {}",
                    kind,
                    item.round_number(),
                    item.instruction()
                ),
                instruction: item.instruction().to_string(),
            },
        )
    }
}

pub(crate) fn writing_registry() -> TargetRegistry {
    TargetRegistry::new()
        .register(Target::new(
            "Outline Writer",
            "Write or revise the outline",
            WorkerKind::Outline,
        ))
        .unwrap()
        .register(Target::new(
            "Article Writer",
            "Write or revise section bodies",
            WorkerKind::Article,
        ))
        .unwrap()
        .register(Target::new(
            "Research Notes",
            "Collect background facts",
            WorkerKind::Context,
        ))
        .unwrap()
}

pub(crate) fn result(kind: WorkerKind, round_number: u64, text: &str) -> WorkerResult {
    WorkerResult::success(
        kind,
        kind.as_str(),
        WorkerPayload {
            round_number,
            text: text.to_string(),
            instruction: "test".to_string(),
        },
    )
    .with_score(1.0)
}
