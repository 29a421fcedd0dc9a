//! Axum route handlers for the Job Description API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::job_description::generator::{generate_job_description, GenerateJdRequest, GeneratedJd};
use crate::state::AppState;

/// POST /api/v1/job-descriptions/generate
///
/// Generates a job description from a role brief in the requested language.
pub async fn handle_generate_jd(
    State(state): State<AppState>,
    Json(request): Json<GenerateJdRequest>,
) -> Result<Json<GeneratedJd>, AppError> {
    let generated = generate_job_description(state.llm.as_ref(), &request).await?;
    Ok(Json(generated))
}
