// All LLM prompt text for candidate screening.

use crate::llm_client::prompts::json_system;

pub const SCREENER_ROLE: &str =
    "You are a virtual recruiter conducting initial text-based screenings of job candidates.";

pub fn screening_system() -> String {
    json_system(SCREENER_ROLE)
}

/// Screening prompt. Replace `{resume_text}`, `{job_description}` and `{questions}` before sending.
pub const SCREENING_PROMPT_TEMPLATE: &str = r#"Simulate a short text-based conversation with the candidate: ask each screening question in order and answer as the candidate would, using ONLY what their resume supports. Evaluate the answers against the job description and the resume, then make a pass/fail decision.

Keep every message short, a sentence or two at most. Make sure the transcript is complete: every question is asked and answered.

Return a JSON object with this EXACT schema (no extra fields):
{
  "pass": true,
  "reason": "One or two sentences explaining the decision",
  "chat_transcript": "Recruiter: ...\nCandidate: ...\nRecruiter: ...\nCandidate: ..."
}

CANDIDATE RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

SCREENING QUESTIONS:
{questions}"#;

/// Renders questions as a numbered list for the prompt.
pub fn numbered_questions(questions: &[String]) -> String {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| format!("{}. {}", i + 1, q))
        .collect::<Vec<_>>()
        .join("\n")
}
