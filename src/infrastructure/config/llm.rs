//! LLM provider configuration.
//!
//! Provides configuration for the Large Language Model providers used by the
//! chat proxy, caption generation and duplicate checks.

use serde::Deserialize;

/// LLM provider configuration.
///
/// Configures which LLM provider to use and provider-specific settings.
/// API keys are read from environment variables (`ANTHROPIC_API_KEY` or
/// `OPENAI_API_KEY`) at runtime.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// LLM provider to use. Defaults to OpenAI.
    #[serde(default)]
    pub provider: LlmProvider,

    /// Anthropic-specific settings.
    #[serde(default)]
    pub anthropic: ProviderConfig,

    /// OpenAI-specific settings.
    #[serde(default = "ProviderConfig::openai")]
    pub openai: ProviderConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            anthropic: ProviderConfig::default(),
            openai: ProviderConfig::openai(),
        }
    }
}

/// LLM provider selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Anthropic Claude models.
    Anthropic,
    /// OpenAI GPT models.
    #[default]
    OpenAi,
    /// No LLM; dependent features fall back or report unavailability.
    Disabled,
}

impl LlmProvider {
    /// Environment variable holding the provider's API key.
    #[must_use]
    pub const fn api_key_var(self) -> Option<&'static str> {
        match self {
            Self::Anthropic => Some("ANTHROPIC_API_KEY"),
            Self::OpenAi => Some("OPENAI_API_KEY"),
            Self::Disabled => None,
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
            Self::Disabled => "disabled",
        })
    }
}

/// Per-provider model settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Model identifier.
    pub model: String,

    /// Sampling temperature for generation.
    ///
    /// Defaults to 0.7.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Maximum tokens in the response. Defaults to 1024.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

impl ProviderConfig {
    /// Defaults for the `[llm.openai]` section.
    #[must_use]
    pub fn openai() -> Self {
        Self {
            model: "gpt-4o-mini".into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: "claude-3-5-haiku-20241022".into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_temperature() -> f64 {
    0.7
}

const fn default_max_tokens() -> usize {
    1024
}
