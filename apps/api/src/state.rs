use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::prompts::PromptBuilder;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Liveness only. `None` when DATABASE_URL is unset or the connection failed.
    pub db: Option<PgPool>,
    /// Pluggable generation backend. Default: GeminiClient.
    pub generator: Arc<dyn TextGenerator>,
    pub prompts: PromptBuilder,
}

impl AppState {
    pub fn new(config: Config, db: Option<PgPool>, generator: Arc<dyn TextGenerator>) -> Self {
        let prompts = PromptBuilder::new(config.resume_char_budget);
        Self {
            config: Arc::new(config),
            db,
            generator,
            prompts,
        }
    }
}
