use async_trait::async_trait;
use qimen::{CompletionError, TextCompleter};

/// Number of prompt characters echoed back.
const ECHO_CHARS: usize = 200;

/// Offline completer that echoes the start of the prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderCompleter;

#[async_trait]
impl TextCompleter for PlaceholderCompleter {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let head: String = prompt.chars().take(ECHO_CHARS).collect();
        Ok(format!("[Stubbed LLM response]\nYou asked: {head}..."))
    }
}
