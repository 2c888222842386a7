//! Axum route handlers for the generation API.
//!
//! Each handler walks the same states: configuration check → validation →
//! (extraction) → prompt → generation → typed response.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};

use crate::errors::AppError;
use crate::extractors::AppJson;
use crate::generation::models::{
    AtsReport, AtsScoreRequest, CoverLetterRequest, CoverLetterResponse, InterviewQuestionsResponse,
    InterviewRequest, RoastResponse, SuggestRequest, SuggestResponse, MAX_QUESTIONS_PER_KIND,
};
use crate::generation::pipeline::{ensure_configured, generate_json, generate_text};
use crate::generation::request::{GenerationRequest, UseCase};
use crate::generation::upload::{extract_resume, UploadForm};
use crate::state::AppState;

const DEFAULT_QUESTIONS_PER_KIND: u32 = 5;

/// POST /api/cover-letter/generate
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    AppJson(request): AppJson<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    ensure_configured(&state, UseCase::CoverLetter)?;
    let request = GenerationRequest::try_from(request)?;

    let content = generate_text(&state, &request).await?;
    Ok(Json(CoverLetterResponse { content }))
}

/// POST /api/roaster/roast
///
/// Multipart: `file` (pdf, docx or txt).
pub async fn handle_roast(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<RoastResponse>, AppError> {
    ensure_configured(&state, UseCase::Roast)?;
    let mut form = UploadForm::read(multipart?, state.config.max_upload_bytes).await?;

    let resume_text = extract_resume(
        form.take_document()?,
        state.config.min_resume_chars,
        UseCase::Roast,
    )
    .await?;

    let roast = generate_text(&state, &GenerationRequest::Roast { resume_text }).await?;
    Ok(Json(RoastResponse { roast }))
}

/// POST /api/ats/score
pub async fn handle_ats_score(
    State(state): State<AppState>,
    AppJson(request): AppJson<AtsScoreRequest>,
) -> Result<Json<AtsReport>, AppError> {
    ensure_configured(&state, UseCase::Ats)?;
    let request = GenerationRequest::try_from(request)?;

    let report = generate_json::<AtsReport>(&state, &request).await?;
    Ok(Json(report))
}

/// POST /api/ats/score-file
///
/// Multipart: `file`, optional `jobDesc`.
pub async fn handle_ats_score_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AtsReport>, AppError> {
    ensure_configured(&state, UseCase::Ats)?;
    let mut form = UploadForm::read(multipart?, state.config.max_upload_bytes).await?;
    let job_description = form.text("jobDesc");

    let resume_text = extract_resume(
        form.take_document()?,
        state.config.min_resume_chars,
        UseCase::Ats,
    )
    .await?;

    let request = GenerationRequest::Ats {
        resume_text,
        job_description,
    };
    let report = generate_json::<AtsReport>(&state, &request).await?;
    Ok(Json(report))
}

/// POST /api/interview/generate
pub async fn handle_interview(
    State(state): State<AppState>,
    AppJson(request): AppJson<InterviewRequest>,
) -> Result<Json<InterviewQuestionsResponse>, AppError> {
    ensure_configured(&state, UseCase::Interview)?;
    let request = GenerationRequest::try_from(request)?;

    let questions = generate_json::<InterviewQuestionsResponse>(&state, &request).await?;
    Ok(Json(questions))
}

/// POST /api/interview/generate-file
///
/// Multipart: `file`, optional `jobDesc`, `numTechQuestions`, `numBehavioralQuestions`.
pub async fn handle_interview_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<InterviewQuestionsResponse>, AppError> {
    ensure_configured(&state, UseCase::Interview)?;
    let mut form = UploadForm::read(multipart?, state.config.max_upload_bytes).await?;

    let technical_count = form.number("numTechQuestions", DEFAULT_QUESTIONS_PER_KIND)?;
    let behavioral_count = form.number("numBehavioralQuestions", DEFAULT_QUESTIONS_PER_KIND)?;
    if technical_count > MAX_QUESTIONS_PER_KIND || behavioral_count > MAX_QUESTIONS_PER_KIND {
        return Err(AppError::InvalidRequest(format!(
            "At most {MAX_QUESTIONS_PER_KIND} questions of each kind may be requested"
        )));
    }
    if technical_count + behavioral_count == 0 {
        return Err(AppError::InvalidRequest(
            "At least one question must be requested".to_string(),
        ));
    }
    let job_description = form.text("jobDesc");

    let resume_text = extract_resume(
        form.take_document()?,
        state.config.min_resume_chars,
        UseCase::Interview,
    )
    .await?;

    let request = GenerationRequest::Interview {
        resume_text,
        job_description,
        technical_count,
        behavioral_count,
    };
    let questions = generate_json::<InterviewQuestionsResponse>(&state, &request).await?;
    Ok(Json(questions))
}

/// POST /api/suggest
pub async fn handle_suggest(
    State(state): State<AppState>,
    AppJson(request): AppJson<SuggestRequest>,
) -> Result<Json<SuggestResponse>, AppError> {
    ensure_configured(&state, UseCase::Suggestion)?;
    let request = GenerationRequest::try_from(request)?;

    let mut response = generate_json::<SuggestResponse>(&state, &request).await?;
    response.suggestions.retain(|s| !s.trim().is_empty());
    Ok(Json(response))
}
