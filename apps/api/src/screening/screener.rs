//! Screener — runs the simulated screening conversation and reads back the decision.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::repair::parse_json_lenient;
use crate::llm_client::{LanguageModel, LlmError, MessagePart};
use crate::screening::prompts::{numbered_questions, screening_system, SCREENING_PROMPT_TEMPLATE};

const MIN_RESUME_CHARS: usize = 100;
const MIN_JOB_DESCRIPTION_CHARS: usize = 50;
const MIN_QUESTIONS_CHARS: usize = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct ScreeningRequest {
    pub resume_text: String,
    pub job_description: String,
    /// Comma-separated questions.
    pub screening_questions: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningOutcome {
    pub pass: bool,
    pub reason: String,
    pub chat_transcript: String,
}

/// Splits the comma-separated question list, dropping blanks.
pub fn parse_questions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_string)
        .collect()
}

/// Checks field lengths and question formatting; returns the parsed questions.
pub fn validate_request(request: &ScreeningRequest) -> Result<Vec<String>, AppError> {
    let min_chars = |value: &str, min: usize, message: &str| {
        if value.trim().chars().count() < min {
            Err(AppError::Validation(message.to_string()))
        } else {
            Ok(())
        }
    };

    min_chars(
        &request.resume_text,
        MIN_RESUME_CHARS,
        "Resume text must be at least 100 characters.",
    )?;
    min_chars(
        &request.job_description,
        MIN_JOB_DESCRIPTION_CHARS,
        "Job description must be at least 50 characters.",
    )?;
    min_chars(
        &request.screening_questions,
        MIN_QUESTIONS_CHARS,
        "Please provide at least one screening question.",
    )?;

    if request.screening_questions.trim_end().ends_with(',') {
        return Err(AppError::Validation(
            "Questions should be comma-separated and not end with a comma.".to_string(),
        ));
    }

    let questions = parse_questions(&request.screening_questions);
    if questions.is_empty() {
        return Err(AppError::Validation(
            "Please provide at least one screening question.".to_string(),
        ));
    }
    Ok(questions)
}

/// Conducts a screening with one LLM call.
pub async fn conduct_screening(
    llm: &dyn LanguageModel,
    request: &ScreeningRequest,
) -> Result<ScreeningOutcome, AppError> {
    let questions = validate_request(request)?;

    let prompt = SCREENING_PROMPT_TEMPLATE
        .replace("{questions}", &numbered_questions(&questions))
        .replace("{job_description}", request.job_description.trim())
        .replace("{resume_text}", request.resume_text.trim());

    info!("Conducting screening with {} questions", questions.len());

    let outcome = llm
        .complete(&screening_system(), &[MessagePart::text(prompt)])
        .await
        .and_then(|text| parse_json_lenient(&text))
        .and_then(|value| read_outcome(&value))
        .map_err(|e| {
            warn!("Candidate screening failed: {e}");
            AppError::Llm("Failed to conduct candidate screening. Please try again.".to_string())
        })?;

    info!(
        "Screening decision: {}",
        if outcome.pass { "pass" } else { "fail" }
    );
    Ok(outcome)
}

fn read_outcome(value: &Value) -> Result<ScreeningOutcome, LlmError> {
    let pass = value
        .get("pass")
        .and_then(read_pass)
        .ok_or_else(|| LlmError::Malformed("missing or invalid 'pass' decision".to_string()))?;
    let reason = value
        .get("reason")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| LlmError::Malformed("missing 'reason'".to_string()))?
        .to_string();
    let chat_transcript = ["chat_transcript", "chatTranscript"]
        .iter()
        .find_map(|key| value.get(*key))
        .map(read_transcript)
        .unwrap_or_default();

    Ok(ScreeningOutcome {
        pass,
        reason,
        chat_transcript,
    })
}

fn read_pass(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "pass" | "passed" => Some(true),
            "false" | "fail" | "failed" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Accepts a transcript string or a list of `{speaker, message}` turns.
fn read_transcript(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Array(turns) => turns
            .iter()
            .filter_map(|turn| match turn {
                Value::String(line) => Some(line.clone()),
                Value::Object(_) => {
                    let speaker = ["speaker", "role"]
                        .iter()
                        .find_map(|k| turn.get(*k).and_then(Value::as_str))
                        .unwrap_or("Unknown");
                    let text = ["message", "text", "content"]
                        .iter()
                        .find_map(|k| turn.get(*k).and_then(Value::as_str))?;
                    Some(format!("{speaker}: {text}"))
                }
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}
