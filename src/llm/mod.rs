//! Text-generation collaborator.
//!
//! The synthesizer only sees [`TextGenerator`]: prompt in, free text out. No
//! structured-output contract is assumed; callers extract and validate JSON
//! themselves.

use async_trait::async_trait;
use thiserror::Error;

pub mod anthropic;

#[cfg(test)]
pub(crate) mod test_server;

pub use anthropic::AnthropicClient;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {attempts} attempt(s)")]
    RateLimited { attempts: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// `generate(prompt) -> text`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Short identifier for logs.
    fn name(&self) -> &str {
        "generator"
    }
}

/// Strip a surrounding Markdown code fence (with or without a language tag).
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop an optional language tag on the opening fence line.
    let rest = match rest.find('\n') {
        Some(newline) if !rest[..newline].contains(['{', '[']) => &rest[newline + 1..],
        _ => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
