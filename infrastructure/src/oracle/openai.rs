//! OpenAI-compatible chat-completions oracle
//!
//! Works with any endpoint speaking the `/chat/completions` protocol
//! (OpenAI, Azure OpenAI, vLLM, LM Studio, ...).

use super::error::{OpenAiError, Result};
use async_trait::async_trait;
use scribe_application::{Oracle, OracleError};
use scribe_domain::{Message, Role};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Connection settings for [`OpenAiOracle`]
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiSettings {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Oracle backed by an OpenAI-compatible HTTP API
pub struct OpenAiOracle {
    client: reqwest::Client,
    settings: OpenAiSettings,
}

impl OpenAiOracle {
    pub fn new(settings: OpenAiSettings) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            settings,
        })
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }

    fn build_request(&self, system_prompt: &str, conversation: &[Message]) -> ChatRequest {
        let mut messages = Vec::with_capacity(conversation.len() + 1);
        messages.push(ChatMessage {
            role: "system".to_string(),
            content: system_prompt.to_string(),
        });
        messages.extend(conversation.iter().map(|m| ChatMessage {
            role: wire_role(m.role).to_string(),
            content: m.content.clone(),
        }));

        ChatRequest {
            model: self.settings.model.clone(),
            messages,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        }
    }

    async fn send(&self, request: &ChatRequest) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.settings.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OpenAiError::from_status(status.as_u16(), body));
        }

        let body: ChatResponse = response.json().await?;
        first_choice(body)
    }
}

fn wire_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Agent => "assistant",
    }
}

fn first_choice(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or(OpenAiError::EmptyChoices)
}

#[async_trait]
impl Oracle for OpenAiOracle {
    async fn complete(
        &self,
        system_prompt: &str,
        conversation: &[Message],
    ) -> std::result::Result<String, OracleError> {
        let request = self.build_request(system_prompt, conversation);
        debug!(
            "Sending {} message(s) to {} ({})",
            request.messages.len(),
            self.settings.model,
            self.endpoint()
        );
        Ok(self.send(&request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oracle() -> OpenAiOracle {
        OpenAiOracle::new(OpenAiSettings {
            base_url: "https://api.example.com/v1/".to_string(),
            api_key: "sk-test".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: None,
            temperature: Some(0.2),
            timeout: Some(Duration::from_secs(30)),
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        assert_eq!(
            oracle().endpoint(),
            "https://api.example.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body() {
        let conversation = vec![Message::user("Plan the round"), Message::agent("Earlier draft")];
        let request = oracle().build_request("You are the Controller", &conversation);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "You are the Controller");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][2]["role"], "assistant");
        assert!((json["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn test_first_choice() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Outline Writer;8;start"}}]}"#,
        )
        .unwrap();
        assert_eq!(first_choice(response).unwrap(), "Outline Writer;8;start");
    }

    #[test]
    fn test_no_choices() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(
            first_choice(response),
            Err(OpenAiError::EmptyChoices)
        ));
    }
}
