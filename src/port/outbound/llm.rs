//! LLM completion port.
//!
//! Defines a generic interface for large language model completion requests.
//! Used by the chat proxy, caption generation, tip extraction and the
//! semantic duplicate checker.

use async_trait::async_trait;

use crate::error::Result;

/// Client for large language model text completion.
///
/// Implementations wrap specific LLM providers (OpenAI, Anthropic, etc.) and
/// handle authentication and response parsing.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`) so a single client can
/// serve concurrent HTTP requests.
///
/// # Errors
///
/// The [`complete`](Self::complete) method returns an error for API failures
/// or invalid responses.
#[async_trait]
pub trait Llm: Send + Sync {
    /// Return the provider name for logging.
    fn name(&self) -> &'static str;

    /// Send a completion request and return the generated text.
    ///
    /// # Arguments
    ///
    /// * `system` - Optional system instructions.
    /// * `prompt` - The user prompt to complete.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response is invalid.
    async fn complete(&self, system: Option<&str>, prompt: &str) -> Result<String>;
}
