//! Text-completion infrastructure adapter.
//!
//! Implements the [`qimen::TextCompleter`] trait for OpenAI-compatible
//! chat-completions APIs. When no API key is configured the
//! [`PlaceholderCompleter`] stands in, so readings still run end to end
//! without network access.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, request formatting, response parsing
//! and `Retry-After` handling live here. The [`qimen`] crate sees only
//! [`qimen::TextCompleter`]; the retry loop itself belongs to the caller.

use std::sync::Arc;

use qimen::TextCompleter;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

mod chat;
mod placeholder;

pub use chat::ChatCompletionsClient;
pub use placeholder::PlaceholderCompleter;

/// Provider settings, read from the `[llm]` config section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// API root; `/chat/completions` is appended.
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 512,
            temperature: 0.7,
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Failures while constructing a completer. Completion-time failures are
/// [`qimen::CompletionError`]s instead.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("Model name must not be blank")]
    BlankModel,

    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Picks the completer for `settings`: the chat-completions client when the
/// configured key variable is set and non-blank, the placeholder otherwise.
pub fn completer_from_settings(
    settings: &LlmSettings,
) -> Result<Arc<dyn TextCompleter>, ClientBuildError> {
    let key = std::env::var(&settings.api_key_env)
        .ok()
        .filter(|k| !k.trim().is_empty());
    match key {
        Some(key) => Ok(Arc::new(ChatCompletionsClient::new(settings, key)?)),
        None => {
            info!(
                env = %settings.api_key_env,
                "no API key configured; using placeholder completions"
            );
            Ok(Arc::new(PlaceholderCompleter))
        }
    }
}
