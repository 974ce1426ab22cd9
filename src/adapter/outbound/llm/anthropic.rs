//! Anthropic Claude LLM client.
//!
//! Implements [`Llm`] over the Anthropic Messages API. The system prompt is
//! sent as the top-level `system` field rather than as a message.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::infrastructure::config::llm::ProviderConfig;
use crate::port::outbound::llm::Llm;

/// Anthropic Messages API endpoint.
const API_URL: &str = "https://api.anthropic.com/v1/messages";

/// API version header value.
const API_VERSION: &str = "2023-06-01";

/// Anthropic Claude API client.
#[derive(Debug)]
pub struct Anthropic {
    client: Client,
    api_key: String,
    /// Model identifier (e.g., "claude-3-5-haiku-20241022").
    model: String,
    max_tokens: usize,
    /// Sampling temperature (0.0 to 1.0).
    temperature: f64,
}

impl Anthropic {
    /// Create a client with explicit settings.
    #[must_use]
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        max_tokens: usize,
        temperature: f64,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens,
            temperature,
        }
    }

    /// Create a client from the `[llm.anthropic]` section.
    #[must_use]
    pub fn from_config(api_key: impl Into<String>, config: &ProviderConfig) -> Self {
        Self::new(api_key, &config.model, config.max_tokens, config.temperature)
    }

    fn request(&self, system: Option<&str>, prompt: &str) -> Request {
        Request {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system: system.map(str::to_string),
            messages: vec![Message {
                role: "user",
                content: prompt.to_string(),
            }],
        }
    }
}

#[derive(Serialize)]
struct Request {
    model: String,
    max_tokens: usize,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct Response {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl Llm for Anthropic {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn complete(&self, system: Option<&str>, prompt: &str) -> Result<String> {
        let response = self
            .client
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&self.request(system, prompt))
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::upstream("anthropic", format!("{status}: {body}")));
        }

        let response: Response = response.json().await?;
        let text: String = response.content.into_iter().map(|c| c.text).collect();
        if text.trim().is_empty() {
            return Err(Error::upstream("anthropic", "empty completion"));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_system_prompt_separately() {
        let client = Anthropic::new("key", "claude-3-5-haiku-20241022", 512, 0.3);
        let json = serde_json::to_value(client.request(Some("You are a guide."), "Hi")).unwrap();

        assert_eq!(json["system"], "You are a guide.");
        assert_eq!(json["max_tokens"], 512);
        assert_eq!(json["messages"].as_array().unwrap().len(), 1);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Hi");
    }

    #[test]
    fn request_omits_missing_system_prompt() {
        let client = Anthropic::new("key", "model", 100, 0.1);
        let json = serde_json::to_value(client.request(None, "Hi")).unwrap();
        assert!(json.get("system").is_none());
    }

    #[test]
    fn response_blocks_are_concatenated() {
        let json = r#"{
            "content": [
                {"type": "text", "text": "Try a "},
                {"type": "text", "text": "spinnerbait."}
            ],
            "id": "msg_456",
            "model": "claude-3-5-haiku-20241022",
            "role": "assistant",
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 10, "output_tokens": 30}
        }"#;

        let response: Response = serde_json::from_str(json).unwrap();
        let combined: String = response.content.into_iter().map(|c| c.text).collect();
        assert_eq!(combined, "Try a spinnerbait.");
    }

    #[test]
    fn from_config_copies_settings() {
        let config = ProviderConfig::default();
        let client = Anthropic::from_config("k", &config);
        assert_eq!(client.model, config.model);
        assert_eq!(client.max_tokens, 1024);
        assert_eq!(client.name(), "anthropic");
    }
}
