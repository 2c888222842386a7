//! Generation client adapter: the single boundary between Resumio and the
//! external language model.
//!
//! Handlers only see `Arc<dyn TextGenerator>`. The default implementation is
//! `GeminiClient`, which makes exactly one attempt per call.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub mod gemini;
#[cfg(test)]
pub mod mock;

pub use gemini::GeminiClient;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation client is not configured (missing API key)")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    #[error("prompt blocked by the model provider: {0}")]
    Blocked(String),

    #[error("model returned empty content")]
    EmptyContent,
}

impl GenerationError {
    /// A description safe to show to API clients: no bodies, URLs or keys.
    pub fn public_summary(&self) -> String {
        match self {
            GenerationError::NotConfigured => "the AI service is not configured".to_string(),
            GenerationError::Transport(e) if e.is_timeout() => {
                "the AI service timed out".to_string()
            }
            GenerationError::Transport(_) => "the AI service could not be reached".to_string(),
            GenerationError::Api { status, .. } => {
                format!("the AI service returned an error (status {status})")
            }
            GenerationError::MalformedResponse(_) => {
                "the AI service returned a malformed response".to_string()
            }
            GenerationError::Blocked(_) => "the AI service declined to answer this request".to_string(),
            GenerationError::EmptyContent => "the AI service returned an empty response".to_string(),
        }
    }
}

/// Submit a prompt, await the text. Stateless, no streaming.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// False when calls are bound to fail with `NotConfigured`. Lets handlers
    /// refuse work before parsing an upload.
    fn is_configured(&self) -> bool {
        true
    }

    /// Backend name for logs.
    fn name(&self) -> &str;
}

/// Decodes model output that was asked to be JSON.
pub fn parse_json_output<T: DeserializeOwned>(text: &str) -> Result<T, GenerationError> {
    serde_json::from_str(strip_json_fences(text))
        .map_err(|e| GenerationError::MalformedResponse(format!("expected JSON output: {e}")))
}

/// Removes a Markdown code fence (optionally tagged `json`) around model output.
/// An unterminated fence still loses its opening line.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(body) = text.strip_prefix("```") else {
        return text;
    };
    let body = body.strip_prefix("json").unwrap_or(body).trim_start();
    body.strip_suffix("```").unwrap_or(body).trim()
}
