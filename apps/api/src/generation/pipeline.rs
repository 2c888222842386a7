//! Prompting and generating: the shared tail of every handler.
//!
//! Flow: ensure_configured → (handler-specific validation/extraction) →
//!       PromptBuilder::build → TextGenerator::generate → typed result.

use serde::de::DeserializeOwned;
use tracing::{error, info};

use crate::errors::AppError;
use crate::generation::models::ModelOutput;
use crate::generation::request::{GenerationRequest, UseCase};
use crate::llm_client::{parse_json_output, GenerationError};
use crate::state::AppState;

/// Fails fast when the generator can only ever answer `NotConfigured`, so
/// uploads are not parsed for nothing.
pub fn ensure_configured(state: &AppState, use_case: UseCase) -> Result<(), AppError> {
    if state.generator.is_configured() {
        return Ok(());
    }
    error!(%use_case, backend = state.generator.name(), "Generation backend is not configured");
    Err(AppError::NotConfigured)
}

/// Builds the prompt for `request` and returns the model's text verbatim.
pub async fn generate_text(state: &AppState, request: &GenerationRequest) -> Result<String, AppError> {
    let use_case = request.use_case();
    let prompt = state.prompts.build(request);

    info!(
        %use_case,
        backend = state.generator.name(),
        prompt_chars = prompt.chars().count(),
        "Dispatching generation request"
    );

    let text = state
        .generator
        .generate(&prompt)
        .await
        .map_err(|e| upstream_failure(use_case, e))?;

    info!(%use_case, output_chars = text.chars().count(), "Generation succeeded");
    Ok(text)
}

/// Like `generate_text`, for use cases whose template asks for JSON.
pub async fn generate_json<T>(state: &AppState, request: &GenerationRequest) -> Result<T, AppError>
where
    T: DeserializeOwned + ModelOutput,
{
    let use_case = request.use_case();
    let text = generate_text(state, request).await?;

    let output: T = parse_json_output(&text).map_err(|e| upstream_failure(use_case, e))?;
    output.check().map_err(|reason| {
        upstream_failure(use_case, GenerationError::MalformedResponse(reason))
    })?;

    Ok(output)
}

/// Logs the full cause and returns the sanitized client-facing error.
fn upstream_failure(use_case: UseCase, err: GenerationError) -> AppError {
    match err {
        GenerationError::NotConfigured => {
            error!(%use_case, "Generation failed: {err}");
            AppError::NotConfigured
        }
        other => {
            error!(%use_case, "Generation failed: {other}");
            AppError::Upstream(format!(
                "{}: {}",
                use_case.failure_prefix(),
                other.public_summary()
            ))
        }
    }
}
