// Resume scoring: request validation, per-resume and chunked batch LLM calls,
// and reconciliation of model output back onto the submitted resumes.
// All LLM calls go through llm_client — no direct Anthropic calls here.

pub mod batch;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod reconcile;
pub mod single;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::MessagePart;
use crate::media::DataUri;

const MIN_JOB_DESCRIPTION_CHARS: usize = 50;
const REQUIRED_INPUT_MESSAGE: &str = "Job description and at least one resume are required.";

/// Tuning for the scoring pipeline. Loaded from `SCORING_*` env vars.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Resumes sent together in one batch call.
    pub chunk_size: usize,
    /// Requests with at most this many resumes are scored one call per resume.
    pub parallel_threshold: usize,
    /// Batch calls allowed in flight at once.
    pub chunk_concurrency: usize,
    pub max_resumes: usize,
    /// Limit on each resume's decoded size.
    pub max_resume_bytes: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            chunk_size: 5,
            parallel_threshold: 3,
            chunk_concurrency: 1,
            max_resumes: 10,
            max_resume_bytes: 5 * 1024 * 1024,
        }
    }
}

impl ScoringConfig {
    /// Largest request body a maximal JSON scoring request can need,
    /// or `None` when the limits are too large to add up.
    pub fn checked_body_limit(&self) -> Option<usize> {
        let encoded_per_resume = self
            .max_resume_bytes
            .div_ceil(3)
            .checked_mul(4)?
            .checked_add(64)?;
        self.max_resumes
            .checked_mul(encoded_per_resume)?
            .checked_add(1024 * 1024)
    }

    pub fn body_limit(&self) -> usize {
        self.checked_body_limit().unwrap_or(usize::MAX)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoreResumesRequest {
    pub job_description: String,
    pub resume_data_uris: Vec<String>,
}

/// The score for one submitted resume. One per input, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResume {
    pub index: usize,
    pub resume_data_uri: String,
    /// 0 – 100
    pub score: u8,
    pub reason: String,
}

/// A validated resume ready to be sent to the model.
#[derive(Debug, Clone)]
pub struct ResumeInput {
    pub index: usize,
    /// The data URI exactly as submitted.
    pub uri: String,
    /// Stable identifier the model echoes back in batch output.
    pub label: String,
    pub part: MessagePart,
}

impl ResumeInput {
    pub fn new(index: usize, uri: String, part: MessagePart) -> Self {
        Self {
            index,
            label: format!("resume-{}", index + 1),
            uri,
            part,
        }
    }

    pub fn scored(&self, score: u8, reason: String) -> ScoredResume {
        ScoredResume {
            index: self.index,
            resume_data_uri: self.uri.clone(),
            score,
            reason,
        }
    }

    /// Placeholder result used whenever the model output cannot be used.
    pub fn fallback(&self, reason: impl Into<String>) -> ScoredResume {
        self.scored(0, reason.into())
    }
}

/// Validates a scoring request and converts each data URI into model content.
pub fn prepare_resumes(
    config: &ScoringConfig,
    job_description: &str,
    resume_data_uris: Vec<String>,
) -> Result<Vec<ResumeInput>, AppError> {
    if job_description.trim().is_empty() || resume_data_uris.is_empty() {
        return Err(AppError::Validation(REQUIRED_INPUT_MESSAGE.to_string()));
    }
    if job_description.trim().chars().count() < MIN_JOB_DESCRIPTION_CHARS {
        return Err(AppError::Validation(format!(
            "Job description must be at least {MIN_JOB_DESCRIPTION_CHARS} characters."
        )));
    }
    if resume_data_uris.len() > config.max_resumes {
        return Err(AppError::Validation(format!(
            "You can upload a maximum of {} resumes.",
            config.max_resumes
        )));
    }

    resume_data_uris
        .into_iter()
        .enumerate()
        .map(|(index, uri)| {
            let position = index + 1;
            let parsed = DataUri::parse(&uri)
                .map_err(|e| AppError::Validation(format!("Resume {position}: {e}")))?;
            if parsed.decoded_len() > config.max_resume_bytes {
                return Err(AppError::Validation(format!(
                    "Resume {position} must be at most {}.",
                    human_size(config.max_resume_bytes)
                )));
            }
            let part = parsed
                .to_part()
                .map_err(|e| AppError::Validation(format!("Resume {position}: {e}")))?;
            Ok(ResumeInput::new(index, uri, part))
        })
        .collect()
}

pub fn human_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * 1024;
    if bytes >= MB && bytes % MB == 0 {
        format!("{}MB", bytes / MB)
    } else if bytes >= KB && bytes % KB == 0 {
        format!("{}KB", bytes / KB)
    } else {
        format!("{bytes} bytes")
    }
}
