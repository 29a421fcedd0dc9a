// All LLM prompt text for resume scoring.

use crate::llm_client::prompts::json_system;
use crate::llm_client::MessagePart;
use crate::scoring::ResumeInput;

pub const SCORING_ROLE: &str = "You are an expert resume screener. \
    You score resumes against a job description from 0 to 100 and justify each score briefly.";

pub fn scoring_system() -> String {
    json_system(SCORING_ROLE)
}

/// Single resume prompt. Replace `{job_description}` and `{resume_id}` before sending.
pub const SINGLE_PROMPT_TEMPLATE: &str = r#"Score the resume attached below against the job description.

Return a single JSON object that MUST contain these three fields:
1. "resume_id": (string) exactly "{resume_id}"
2. "score": (number) an integer from 0 to 100. This field is MANDATORY and MUST be a number.
3. "reason": (string) a brief explanation for the score, at most 150 characters.

JOB DESCRIPTION:
{job_description}

Resume to evaluate ({resume_id}):"#;

pub const SINGLE_PROMPT_FOOTER: &str = r#"Example output: {"resume_id": "resume-1", "score": 75, "reason": "Good fit based on relevant experience."}
Return only the JSON object."#;

/// Batch prompt header. Replace `{job_description}` and `{count}` before sending.
pub const BATCH_PROMPT_TEMPLATE: &str = r#"Score EACH of the {count} resumes attached below against the job description.

Return a JSON ARRAY with exactly one object per resume. Every object MUST contain:
1. "resume_id": (string) the identifier shown above that resume, copied exactly
2. "score": (number) an integer from 0 to 100. MANDATORY for every resume.
3. "reason": (string) a brief explanation for the score, at most 150 characters.

JOB DESCRIPTION:
{job_description}

Resumes to evaluate (process each one):"#;

pub const BATCH_PROMPT_FOOTER: &str = r#"HARD RULES:
1. Output ONE JSON array and nothing else
2. Every resume above gets exactly one object
3. "resume_id" MUST EXACTLY MATCH the identifier of the resume it scores
Example: [{"resume_id": "resume-1", "score": 80, "reason": "Strong Rust background."}, {"resume_id": "resume-2", "score": 65, "reason": "Limited distributed systems work."}]"#;

/// Builds the message content for scoring one resume.
pub fn single_parts(job_description: &str, resume: &ResumeInput) -> Vec<MessagePart> {
    let header = SINGLE_PROMPT_TEMPLATE
        .replace("{job_description}", job_description.trim())
        .replace("{resume_id}", &resume.label);
    vec![
        MessagePart::text(header),
        resume.part.clone(),
        MessagePart::text(SINGLE_PROMPT_FOOTER),
    ]
}

/// Builds the message content for scoring a chunk: header, then each resume
/// introduced by its identifier, then the output rules.
pub fn batch_parts(job_description: &str, chunk: &[ResumeInput]) -> Vec<MessagePart> {
    let header = BATCH_PROMPT_TEMPLATE
        .replace("{job_description}", job_description.trim())
        .replace("{count}", &chunk.len().to_string());

    let mut parts = Vec::with_capacity(chunk.len() * 3 + 2);
    parts.push(MessagePart::text(header));
    for resume in chunk {
        parts.push(MessagePart::text(format!("Resume (resume_id: {}):", resume.label)));
        parts.push(resume.part.clone());
        parts.push(MessagePart::text("---"));
    }
    parts.push(MessagePart::text(BATCH_PROMPT_FOOTER));
    parts
}
