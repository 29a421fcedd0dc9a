//! JD Generator — turns a role brief into a full job description in English or Bengali.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::job_description::prompts::{jd_system, JD_PROMPT_TEMPLATE};
use crate::llm_client::repair::{parse_json_lenient, strip_json_fences};
use crate::llm_client::{LanguageModel, LlmError, MessagePart};

pub const MIN_ROLE_BRIEF_CHARS: usize = 50;

/// Output language of the generated job description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Bn,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Bn => "bn",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Bn => "Bengali (Bangla)",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateJdRequest {
    pub role_brief: String,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedJd {
    pub job_description: String,
    pub language: Language,
}

pub fn validate_request(request: &GenerateJdRequest) -> Result<(), AppError> {
    if request.role_brief.trim().chars().count() < MIN_ROLE_BRIEF_CHARS {
        return Err(AppError::Validation(format!(
            "Role brief must be at least {MIN_ROLE_BRIEF_CHARS} characters."
        )));
    }
    Ok(())
}

/// Generates a job description with one LLM call.
pub async fn generate_job_description(
    llm: &dyn LanguageModel,
    request: &GenerateJdRequest,
) -> Result<GeneratedJd, AppError> {
    validate_request(request)?;

    let prompt = JD_PROMPT_TEMPLATE
        .replace("{language}", request.language.display_name())
        .replace("{language_code}", request.language.code())
        .replace("{role_brief}", request.role_brief.trim());

    info!("Generating job description (language: {})", request.language.code());

    let text = llm
        .complete(&jd_system(), &[MessagePart::text(prompt)])
        .await
        .map_err(generation_failed)?;

    let job_description = extract_job_description(&text).map_err(generation_failed)?;

    info!(
        "Generated job description: {} characters",
        job_description.chars().count()
    );

    Ok(GeneratedJd {
        job_description,
        language: request.language,
    })
}

fn generation_failed(e: LlmError) -> AppError {
    warn!("Job description generation failed: {e}");
    AppError::Llm("Failed to generate job description. Please try again.".to_string())
}

/// Reads the description from the model's JSON, falling back to the raw text
/// when the model answered in prose.
fn extract_job_description(text: &str) -> Result<String, LlmError> {
    let from_json = parse_json_lenient(text).ok().and_then(|value| {
        ["job_description", "jobDescription"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str).map(str::to_string))
    });

    let description = match from_json {
        Some(description) => description,
        None => {
            let raw = strip_json_fences(text);
            if raw.starts_with('{') || raw.starts_with('[') {
                return Err(LlmError::Malformed(
                    "JSON response has no job_description field".to_string(),
                ));
            }
            warn!("Model answered in prose; using raw text as the job description");
            raw.to_string()
        }
    };

    let description = description.trim().to_string();
    if description.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    Ok(description)
}
