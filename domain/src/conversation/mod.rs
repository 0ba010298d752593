//! Conversation history shared by the user and the council.
//!
//! The history is append-only. The driving caller appends the user's
//! request before a run and the finished article after it; the round use
//! cases only ever read it.

use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Agent => "agent",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message in a conversation (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn agent(content: impl Into<String>) -> Self {
        Self {
            role: Role::Agent,
            content: content.into(),
        }
    }
}

/// Append-only ordered sequence of conversation messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationHistory {
    messages: Vec<Message>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(Message::user(content));
    }

    pub fn push_agent(&mut self, content: impl Into<String>) {
        self.push(Message::agent(content));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Render the history as `role: content` lines for prompt embedding.
    pub fn render(&self) -> String {
        self.messages
            .iter()
            .map(|m| format!("{}: {}", m.role, m.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl FromIterator<Message> for ConversationHistory {
    fn from_iter<I: IntoIterator<Item = Message>>(iter: I) -> Self {
        Self {
            messages: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_appends_in_order() {
        let mut history = ConversationHistory::new();
        history.push_user("Write about boxes");
        history.push_agent("# Boxes");

        assert_eq!(history.len(), 2);
        assert_eq!(history.messages()[0].role, Role::User);
        assert_eq!(history.messages()[1].role, Role::Agent);
    }

    #[test]
    fn test_render_uses_role_prefix() {
        let history: ConversationHistory = vec![
            Message::user("Tell me about cardboard"),
            Message::agent("Cardboard is layered paper."),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            history.render(),
            "user: Tell me about cardboard\nagent: Cardboard is layered paper."
        );
    }

    #[test]
    fn test_render_empty_history() {
        assert_eq!(ConversationHistory::new().render(), "");
    }
}
