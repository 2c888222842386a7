use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{GenerationError, TextGenerator};

/// A scripted generator for tests. Replays queued results in order, then
/// falls back to a fixed reply. Records every prompt it receives.
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, GenerationError>>>,
    fallback: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            fallback: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with `text`.
    pub fn always(text: impl Into<String>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: Some(text.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        if let Some(reply) = self.replies.lock().unwrap().pop_front() {
            return reply;
        }
        self.fallback.clone().ok_or_else(|| {
            GenerationError::MalformedResponse("ScriptedGenerator: no more replies".to_string())
        })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
