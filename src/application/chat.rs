//! Fishing-assistant chat proxy.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::error::DomainError;
use crate::error::Result;
use crate::port::outbound::llm::Llm;

/// Longest accepted user message.
pub const MESSAGE_MAX: usize = 2000;
/// Turns of history forwarded to the model.
pub const HISTORY_MAX: usize = 10;

const SYSTEM_PROMPT: &str = "You are the FishandTips fishing assistant. Answer questions about \
fishing techniques, gear, bait, species, seasons and regulations in a friendly, practical tone. \
Keep answers under 200 words. If a question is unrelated to fishing or the outdoors, politely \
steer the conversation back. Never invent local regulations; suggest checking the state or \
provincial agency instead.";

/// Reply used when no language model is configured.
pub const FALLBACK_REPLY: &str = "Our fishing assistant is taking a break right now. In the \
meantime, browse our technique guides or send us a message through the contact page and an \
angler on the team will get back to you.";

/// Speaker of a history turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One earlier turn of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

/// Chat request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub history: Vec<Turn>,
}

/// Chat response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub fallback: bool,
}

/// Check the message and return it trimmed.
///
/// # Errors
/// Returns a domain error for an empty or overlong message.
pub fn validate(request: &ChatRequest) -> std::result::Result<&str, DomainError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(DomainError::MissingField { field: "message" });
    }
    if message.chars().count() > MESSAGE_MAX {
        return Err(DomainError::TooLong {
            field: "message",
            max: MESSAGE_MAX,
        });
    }
    Ok(message)
}

/// Conversation transcript sent as the user prompt.
#[must_use]
pub fn build_prompt(history: &[Turn], message: &str) -> String {
    let recent = &history[history.len().saturating_sub(HISTORY_MAX)..];
    let mut prompt = String::new();
    for turn in recent {
        let speaker = match turn.role {
            Role::User => "Angler",
            Role::Assistant => "Assistant",
        };
        prompt.push_str(speaker);
        prompt.push_str(": ");
        prompt.push_str(turn.content.trim());
        prompt.push('\n');
    }
    prompt.push_str("Angler: ");
    prompt.push_str(message);
    prompt.push_str("\nAssistant:");
    prompt
}

/// Answer a chat message, or return the fallback when `llm` is `None`.
///
/// # Errors
/// Returns a domain error for invalid input and the LLM's error when the
/// completion fails.
pub async fn reply(llm: Option<&dyn Llm>, request: &ChatRequest) -> Result<ChatReply> {
    let message = validate(request)?;

    let Some(llm) = llm else {
        debug!("No LLM configured; sending fallback chat reply");
        return Ok(ChatReply {
            reply: FALLBACK_REPLY.to_string(),
            fallback: true,
        });
    };

    let prompt = build_prompt(&request.history, message);
    let text = llm.complete(Some(SYSTEM_PROMPT), &prompt).await.map_err(|e| {
        warn!(provider = llm.name(), error = %e, "Chat completion failed");
        e
    })?;

    Ok(ChatReply {
        reply: text.trim().to_string(),
        fallback: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testkit::fakes::ScriptedLlm;

    fn turn(role: Role, content: &str) -> Turn {
        Turn {
            role,
            content: content.into(),
        }
    }

    fn request(message: &str) -> ChatRequest {
        ChatRequest {
            message: message.into(),
            history: vec![],
        }
    }

    #[test]
    fn rejects_empty_and_overlong_messages() {
        assert!(validate(&request("   ")).is_err());
        assert!(validate(&request(&"x".repeat(MESSAGE_MAX))).is_ok());
        assert!(matches!(
            validate(&request(&"x".repeat(MESSAGE_MAX + 1))),
            Err(DomainError::TooLong { .. })
        ));
    }

    #[test]
    fn prompt_keeps_last_ten_turns() {
        let history: Vec<Turn> = (0..14).map(|i| turn(Role::User, &format!("q{i}"))).collect();
        let prompt = build_prompt(&history, "best bait?");
        assert!(!prompt.contains("q3\n"));
        assert!(prompt.contains("Angler: q4\n"));
        assert!(prompt.ends_with("Angler: best bait?\nAssistant:"));
        assert_eq!(prompt.matches("Angler:").count(), 11);
    }

    #[tokio::test]
    async fn fallback_without_llm() {
        let reply = reply(None, &request("hi")).await.unwrap();
        assert!(reply.fallback);
        assert_eq!(reply.reply, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn uses_llm_reply() {
        let llm = ScriptedLlm::new(["  Try a slip bobber.  "]);
        let reply = reply(Some(&llm), &request("crappie rig?")).await.unwrap();
        assert_eq!(reply.reply, "Try a slip bobber.");
        assert!(!reply.fallback);
        assert!(llm.prompts()[0].contains("crappie rig?"));
    }

    #[tokio::test]
    async fn llm_failure_propagates() {
        let llm = ScriptedLlm::failing();
        let err = reply(Some(&llm), &request("hello")).await.unwrap_err();
        assert!(matches!(err, Error::Upstream { .. }));
    }
}
