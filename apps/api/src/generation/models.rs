//! Request and response envelopes for the generation endpoints.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::request::{GenerationRequest, QuestionType, SeniorityLevel, SuggestTask};

pub const DEFAULT_TONE: &str = "Professional";
pub const MAX_QUESTIONS_PER_KIND: u32 = 20;
pub const MAX_SUGGESTIONS: u32 = 20;
pub const DEFAULT_SUGGESTIONS: u32 = 3;

// ────────────────────────────────────────────────────────────────────────────
// Requests
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRequest {
    pub resume_text: String,
    pub job_description: String,
    pub company_name: String,
    pub job_role: String,
    #[serde(default)]
    pub tone: Option<String>,
}

impl TryFrom<CoverLetterRequest> for GenerationRequest {
    type Error = AppError;

    fn try_from(req: CoverLetterRequest) -> Result<Self, Self::Error> {
        let tone = match req.tone {
            Some(tone) => required("tone", tone)?,
            None => DEFAULT_TONE.to_string(),
        };
        Ok(GenerationRequest::CoverLetter {
            resume_text: required("resumeText", req.resume_text)?,
            job_description: required("jobDescription", req.job_description)?,
            company_name: required("companyName", req.company_name)?,
            job_role: required("jobRole", req.job_role)?,
            tone,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsScoreRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_desc: Option<String>,
}

impl TryFrom<AtsScoreRequest> for GenerationRequest {
    type Error = AppError;

    fn try_from(req: AtsScoreRequest) -> Result<Self, Self::Error> {
        Ok(GenerationRequest::Ats {
            resume_text: required("resumeText", req.resume_text)?,
            job_description: optional(req.job_desc),
        })
    }
}

/// Field names follow the existing frontend contract (snake_case).
#[derive(Debug, Deserialize)]
pub struct InterviewRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
    pub question_type: QuestionType,
    pub count: u32,
}

impl TryFrom<InterviewRequest> for GenerationRequest {
    type Error = AppError;

    fn try_from(req: InterviewRequest) -> Result<Self, Self::Error> {
        if req.count == 0 || req.count > MAX_QUESTIONS_PER_KIND {
            return Err(AppError::InvalidRequest(format!(
                "count must be between 1 and {MAX_QUESTIONS_PER_KIND}"
            )));
        }
        let (technical_count, behavioral_count) = req.question_type.split(req.count);
        Ok(GenerationRequest::Interview {
            resume_text: required("resume_text", req.resume_text)?,
            job_description: optional(req.job_description),
            technical_count,
            behavioral_count,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestRequest {
    pub task: SuggestTask,
    pub source_text: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub level: Option<SeniorityLevel>,
    #[serde(default)]
    pub job_desc: Option<String>,
    #[serde(default)]
    pub count: Option<u32>,
}

impl TryFrom<SuggestRequest> for GenerationRequest {
    type Error = AppError;

    fn try_from(req: SuggestRequest) -> Result<Self, Self::Error> {
        let count = req.count.unwrap_or(DEFAULT_SUGGESTIONS);
        if count == 0 || count > MAX_SUGGESTIONS {
            return Err(AppError::InvalidRequest(format!(
                "count must be between 1 and {MAX_SUGGESTIONS}"
            )));
        }
        Ok(GenerationRequest::Suggestion {
            task: req.task,
            source_text: required("sourceText", req.source_text)?,
            role: optional(req.role),
            level: req.level,
            job_description: optional(req.job_desc),
            count,
        })
    }
}

/// Rejects blank values; the value itself is passed on untouched.
pub fn required(field: &str, value: String) -> Result<String, AppError> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidRequest(format!("{field} must not be empty")));
    }
    Ok(value)
}

/// Optional text fields: blank means "not provided".
pub fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Responses
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct RoastResponse {
    pub roast: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsBreakdown {
    pub keywords: u32,
    pub verbs: u32,
    pub metrics: u32,
    pub sections: u32,
    pub experience: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsReport {
    pub score: u32,
    pub breakdown: AtsBreakdown,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionCategory {
    Technical,
    Behavioral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub question: String,
    pub suggested_answer: String,
    pub category: QuestionCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewQuestionsResponse {
    #[serde(default)]
    pub technical_questions: Vec<InterviewQuestion>,
    #[serde(default)]
    pub behavioral_questions: Vec<InterviewQuestion>,
}

/// Structural checks on decoded model output. A failure is treated as a
/// malformed upstream response, never patched up.
pub trait ModelOutput {
    fn check(&self) -> Result<(), String>;
}

impl ModelOutput for AtsReport {
    fn check(&self) -> Result<(), String> {
        let b = &self.breakdown;
        let scores = [
            ("score", self.score),
            ("keywords", b.keywords),
            ("verbs", b.verbs),
            ("metrics", b.metrics),
            ("sections", b.sections),
            ("experience", b.experience),
        ];
        match scores.iter().find(|(_, value)| *value > 100) {
            Some((name, value)) => Err(format!("{name} score {value} is outside 0-100")),
            None => Ok(()),
        }
    }
}

impl ModelOutput for InterviewQuestionsResponse {
    fn check(&self) -> Result<(), String> {
        if self.technical_questions.is_empty() && self.behavioral_questions.is_empty() {
            return Err("no interview questions returned".to_string());
        }
        Ok(())
    }
}

impl ModelOutput for SuggestResponse {
    fn check(&self) -> Result<(), String> {
        if self.suggestions.iter().all(|s| s.trim().is_empty()) {
            return Err("no suggestions returned".to_string());
        }
        Ok(())
    }
}
