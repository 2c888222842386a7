//! Prompt builder: one template per use case, selected by `GenerationRequest`.
//!
//! Pure and infallible. Resume text is cut to the configured character budget
//! before interpolation, the same way for every use case.

pub mod templates;

use crate::generation::request::{GenerationRequest, SuggestTask};
use templates::*;

#[derive(Debug, Clone, Copy)]
pub struct PromptBuilder {
    resume_char_budget: usize,
}

impl PromptBuilder {
    pub fn new(resume_char_budget: usize) -> Self {
        Self { resume_char_budget }
    }

    pub fn resume_char_budget(&self) -> usize {
        self.resume_char_budget
    }

    pub fn build(&self, request: &GenerationRequest) -> String {
        match request {
            GenerationRequest::CoverLetter {
                resume_text,
                job_description,
                company_name,
                job_role,
                tone,
            } => render(
                COVER_LETTER_TEMPLATE,
                &[
                    ("job_role", job_role.as_str()),
                    ("company_name", company_name.as_str()),
                    ("tone", tone.as_str()),
                    ("resume_text", self.bounded(resume_text)),
                    ("job_description", job_description.as_str()),
                ],
            ),

            GenerationRequest::Roast { resume_text } => render(
                ROAST_TEMPLATE,
                &[("resume_text", self.bounded(resume_text))],
            ),

            GenerationRequest::Ats {
                resume_text,
                job_description,
            } => {
                let job_section = optional_section(
                    ATS_JOB_SECTION,
                    ATS_NO_JOB_SECTION,
                    job_description.as_deref(),
                );
                render(
                    ATS_TEMPLATE,
                    &[
                        ("resume_text", self.bounded(resume_text)),
                        ("job_section", job_section.as_str()),
                    ],
                )
            }

            GenerationRequest::Interview {
                resume_text,
                job_description,
                technical_count,
                behavioral_count,
            } => {
                let job_section = optional_section(
                    INTERVIEW_JOB_SECTION,
                    INTERVIEW_NO_JOB_SECTION,
                    job_description.as_deref(),
                );
                let technical_count = technical_count.to_string();
                let behavioral_count = behavioral_count.to_string();
                render(
                    INTERVIEW_TEMPLATE,
                    &[
                        ("technical_count", technical_count.as_str()),
                        ("behavioral_count", behavioral_count.as_str()),
                        ("resume_text", self.bounded(resume_text)),
                        ("job_section", job_section.as_str()),
                    ],
                )
            }

            GenerationRequest::Suggestion {
                task,
                source_text,
                role,
                level,
                job_description,
                count,
            } => {
                let mut context_lines = Vec::new();
                if let Some(role) = role {
                    context_lines.push(render(SUGGEST_ROLE_LINE, &[("role", role.as_str())]));
                }
                if let Some(level) = level {
                    context_lines.push(render(SUGGEST_LEVEL_LINE, &[("level", level.as_str())]));
                }
                if let Some(jd) = job_description {
                    context_lines.push(render(SUGGEST_JOB_LINE, &[("job_description", jd.as_str())]));
                }
                let context_section = if context_lines.is_empty() {
                    SUGGEST_NO_CONTEXT.to_string()
                } else {
                    context_lines.join("\n")
                };

                let count = count.to_string();
                render(
                    SUGGEST_TEMPLATE,
                    &[
                        ("count", count.as_str()),
                        ("task_instructions", task_instructions(*task)),
                        ("source_text", self.bounded(source_text)),
                        ("context_section", context_section.as_str()),
                    ],
                )
            }
        }
    }

    fn bounded<'a>(&self, text: &'a str) -> &'a str {
        truncate_chars(text, self.resume_char_budget)
    }
}

fn task_instructions(task: SuggestTask) -> &'static str {
    match task {
        SuggestTask::Bullet => SUGGEST_BULLET_TASK,
        SuggestTask::Summary => SUGGEST_SUMMARY_TASK,
        SuggestTask::Skills => SUGGEST_SKILLS_TASK,
        SuggestTask::Rewrite => SUGGEST_REWRITE_TASK,
    }
}

fn optional_section(with: &str, without: &str, job_description: Option<&str>) -> String {
    match job_description {
        Some(jd) => render(with, &[("job_description", jd)]),
        None => without.to_string(),
    }
}

/// First `max_chars` characters of `text`, cut on a `char` boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Single-pass `{name}` substitution.
///
/// Substituted values are never re-scanned, so user text that happens to
/// contain `{job_description}` stays literal. Braces whose contents are not a
/// known slot name are copied through unchanged.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let values_len: usize = vars.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + values_len);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let slot = after_open.find('}').and_then(|close| {
            let name = &after_open[..close];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (close, *value))
        });

        match slot {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after_open[close + 1..];
            }
            None => {
                out.push('{');
                rest = after_open;
            }
        }
    }

    out.push_str(rest);
    out
}
