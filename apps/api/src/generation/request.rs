//! Validated, use-case specific generation requests.
//!
//! A `GenerationRequest` only exists after boundary validation; the prompt
//! builder and the pipeline never re-check fields.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The supported document-generation tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseCase {
    CoverLetter,
    Roast,
    Ats,
    Interview,
    Suggestion,
}

impl UseCase {
    pub fn as_str(&self) -> &'static str {
        match self {
            UseCase::CoverLetter => "cover-letter",
            UseCase::Roast => "roast",
            UseCase::Ats => "ats",
            UseCase::Interview => "interview",
            UseCase::Suggestion => "suggestion",
        }
    }

    /// Leading clause of client-facing failure messages.
    pub fn failure_prefix(&self) -> &'static str {
        match self {
            UseCase::CoverLetter => "Failed to generate cover letter",
            UseCase::Roast => "Failed to roast resume",
            UseCase::Ats => "Failed to score resume",
            UseCase::Interview => "Failed to generate interview questions",
            UseCase::Suggestion => "Failed to generate suggestions",
        }
    }
}

impl fmt::Display for UseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestTask {
    Bullet,
    Summary,
    Skills,
    Rewrite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeniorityLevel {
    Intern,
    Entry,
    Junior,
    Mid,
    Senior,
}

impl SeniorityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeniorityLevel::Intern => "intern",
            SeniorityLevel::Entry => "entry",
            SeniorityLevel::Junior => "junior",
            SeniorityLevel::Mid => "mid",
            SeniorityLevel::Senior => "senior",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Technical,
    Behavioral,
    Mixed,
}

impl QuestionType {
    /// Splits `count` into (technical, behavioral). Mixed favours technical on odd counts.
    pub fn split(&self, count: u32) -> (u32, u32) {
        match self {
            QuestionType::Technical => (count, 0),
            QuestionType::Behavioral => (0, count),
            QuestionType::Mixed => (count - count / 2, count / 2),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRequest {
    CoverLetter {
        resume_text: String,
        job_description: String,
        company_name: String,
        job_role: String,
        tone: String,
    },
    Roast {
        resume_text: String,
    },
    Ats {
        resume_text: String,
        job_description: Option<String>,
    },
    Interview {
        resume_text: String,
        job_description: Option<String>,
        technical_count: u32,
        behavioral_count: u32,
    },
    Suggestion {
        task: SuggestTask,
        source_text: String,
        role: Option<String>,
        level: Option<SeniorityLevel>,
        job_description: Option<String>,
        count: u32,
    },
}

impl GenerationRequest {
    pub fn use_case(&self) -> UseCase {
        match self {
            GenerationRequest::CoverLetter { .. } => UseCase::CoverLetter,
            GenerationRequest::Roast { .. } => UseCase::Roast,
            GenerationRequest::Ats { .. } => UseCase::Ats,
            GenerationRequest::Interview { .. } => UseCase::Interview,
            GenerationRequest::Suggestion { .. } => UseCase::Suggestion,
        }
    }
}
