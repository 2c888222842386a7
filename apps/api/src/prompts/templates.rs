// Prompt wording for every use case. Slots are `{name}` and are filled by
// `prompts::render`; any other brace text (JSON examples) is sent verbatim.

/// Replace: {job_role}, {company_name}, {tone}, {resume_text}, {job_description}
pub const COVER_LETTER_TEMPLATE: &str = r#"Write a professional cover letter for the role of {job_role} at {company_name}.

Tone: {tone}

Using the following Resume and Job Description:

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Requirements:
1. Keep it concise (300-400 words).
2. Highlight relevant skills from the resume that match the job description.
3. Use standard business letter formatting.
4. Do not include placeholders like "[Your Name]" if the information can be inferred from the resume; otherwise use generic placeholders.
5. Return ONLY the body of the letter."#;

/// Replace: {resume_text}
pub const ROAST_TEMPLATE: &str = r#"You are a professional comedian and strict career coach. Your task is to "roast" the following resume.

RESUME CONTENT:
{resume_text}

INSTRUCTIONS:
1. Be brutally honest but constructively helpful.
2. Use humor, sarcasm, and wit. Make it funny!
3. Structure the response with these sections (use Markdown):
   - 🔥 **First Impression**: A quick, biting opening.
   - 💼 **Experience Roast**: Poke fun at vague descriptions or weak verbs.
   - 🎯 **Skills Reality Check**: Call out buzzwords or generic skills.
   - 🌟 **Achievement Check**: Are they bragging about nothing?
   - 💡 **The Real Talk** (Constructive Feedback): 3-5 actual, serious tips to improve.
   - 🎪 **The Verdict**: A final summary rating or closing thought.
4. Do NOT be mean-spirited or offensive (no racism, sexism, etc.). Keep it professional-roast style."#;

/// Replace: {resume_text}, {job_section}
pub const ATS_TEMPLATE: &str = r#"You are an applicant tracking system (ATS) auditor. Score how well the resume below would survive automated screening.

RESUME:
{resume_text}

{job_section}

Score each dimension from 0 to 100:
- keywords: coverage of role-relevant keywords
- verbs: use of strong action verbs
- metrics: quantified achievements (numbers, percentages, amounts)
- sections: presence of standard sections (summary, experience, education, skills)
- experience: clarity of roles, dates and descriptions

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 78,
  "breakdown": {"keywords": 70, "verbs": 85, "metrics": 60, "sections": 90, "experience": 80},
  "missing_keywords": ["Kubernetes"],
  "tips": ["Quantify the impact of the migration project."]
}

RULES:
1. "score" is the overall 0-100 rating, not an average you must compute exactly.
2. Give 3-6 concrete, actionable tips.
3. Return ONLY the JSON object. No markdown fences, no commentary."#;

/// Replace: {job_description}
pub const ATS_JOB_SECTION: &str = r#"JOB DESCRIPTION (score keyword coverage against this):
{job_description}"#;

pub const ATS_NO_JOB_SECTION: &str = "No job description was provided. Judge keyword coverage against the role the resume itself targets.";

/// Replace: {technical_count}, {behavioral_count}, {resume_text}, {job_section}
pub const INTERVIEW_TEMPLATE: &str = r#"You are an experienced hiring manager preparing a candidate for interviews.

Generate exactly {technical_count} technical question(s) and {behavioral_count} behavioral question(s) tailored to the candidate below.

CANDIDATE RESUME:
{resume_text}

{job_section}

For each question provide a suggested answer grounded in the candidate's actual experience.

Return a JSON object with this EXACT schema:
{
  "technical_questions": [
    {"question": "string", "suggested_answer": "string", "category": "technical", "difficulty": "easy" | "medium" | "hard", "context": "why this is likely to be asked"}
  ],
  "behavioral_questions": [
    {"question": "string", "suggested_answer": "string", "category": "behavioral", "difficulty": "easy" | "medium" | "hard", "context": "why this is likely to be asked"}
  ]
}

Return ONLY the JSON object. No markdown fences, no commentary."#;

/// Replace: {job_description}
pub const INTERVIEW_JOB_SECTION: &str = r#"TARGET JOB DESCRIPTION:
{job_description}"#;

pub const INTERVIEW_NO_JOB_SECTION: &str = "No job description was provided. Base the questions on the roles and skills in the resume.";

/// Replace: {count}, {task_instructions}, {source_text}, {context_section}
pub const SUGGEST_TEMPLATE: &str = r#"You are an expert resume writer.

TASK:
{task_instructions}

SOURCE TEXT:
{source_text}

{context_section}

Produce exactly {count} distinct alternative(s).

Return a JSON object with this EXACT schema:
{"suggestions": ["string"]}

Return ONLY the JSON object. No markdown fences, no commentary."#;

pub const SUGGEST_BULLET_TASK: &str = "Rewrite the source text as strong resume bullet points. Start with an action verb, quantify impact where the text supports it, keep each under 25 words.";

pub const SUGGEST_SUMMARY_TASK: &str = "Write a professional summary (2-3 sentences) based on the source text.";

pub const SUGGEST_SKILLS_TASK: &str = "Suggest concise skills-section entries supported by the source text. Each suggestion is a comma-separated group of related skills.";

pub const SUGGEST_REWRITE_TASK: &str = "Rewrite the source text to be clearer, more concise and more impactful without inventing facts.";

/// Replace: {role}
pub const SUGGEST_ROLE_LINE: &str = "Target role: {role}";

/// Replace: {level}
pub const SUGGEST_LEVEL_LINE: &str = "Seniority level: {level}";

/// Replace: {job_description}
pub const SUGGEST_JOB_LINE: &str = "Job description:\n{job_description}";

pub const SUGGEST_NO_CONTEXT: &str = "No additional role context was provided.";
