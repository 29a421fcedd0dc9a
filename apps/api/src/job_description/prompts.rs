// All LLM prompt text for job description generation.

use crate::llm_client::prompts::json_system;

pub const JD_WRITER_ROLE: &str =
    "You are an expert HR specialist, skilled at writing compelling job descriptions.";

pub fn jd_system() -> String {
    json_system(JD_WRITER_ROLE)
}

/// JD generation prompt. Replace `{role_brief}`, `{language}` and `{language_code}` before sending.
pub const JD_PROMPT_TEMPLATE: &str = r#"You will be given a brief description of a role. Write a complete job description for it in {language} (language code "{language_code}").

The job description should include: a role title, a short company/role overview, key responsibilities, required qualifications, nice-to-have qualifications, and what the company offers. Write every section in {language}.

Return a JSON object with this EXACT schema (no extra fields):
{
  "job_description": "the full job description as plain text, sections separated by blank lines"
}

ROLE BRIEF:
{role_brief}"#;
