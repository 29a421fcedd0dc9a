//! Axum route handlers for the Scoring API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::media::{mime_from_filename, DataUri};
use crate::scoring::pipeline::score_resumes;
use crate::scoring::{human_size, prepare_resumes, ScoreResumesRequest, ScoredResume};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ScoreResumesResponse {
    pub run_id: Uuid,
    pub results: Vec<ScoredResume>,
    pub scored_at: DateTime<Utc>,
}

/// POST /api/v1/resumes/score
///
/// Scores resumes submitted as base64 data URIs against a job description.
pub async fn handle_score_resumes(
    State(state): State<AppState>,
    Json(request): Json<ScoreResumesRequest>,
) -> Result<Json<ScoreResumesResponse>, AppError> {
    run_scoring(&state, request).await.map(Json)
}

/// POST /api/v1/resumes/score/upload
///
/// Multipart variant: a `job_description` text field plus one file field per
/// resume. Files are converted to data URIs and scored like the JSON endpoint.
pub async fn handle_score_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScoreResumesResponse>, AppError> {
    let limits = &state.config.scoring;
    let mut job_description = String::new();
    let mut resume_data_uris = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let Some(file_name) = field.file_name().map(str::to_string) else {
            if name == "job_description" {
                job_description = field.text().await?;
            }
            continue;
        };

        if resume_data_uris.len() >= limits.max_resumes {
            return Err(AppError::Validation(format!(
                "You can upload a maximum of {} resumes.",
                limits.max_resumes
            )));
        }

        let mime = field
            .content_type()
            .filter(|ct| !ct.is_empty() && *ct != "application/octet-stream")
            .map(str::to_string)
            .or_else(|| mime_from_filename(&file_name).map(str::to_string))
            .ok_or_else(|| {
                AppError::Validation(format!("Cannot determine the file type of '{file_name}'."))
            })?;

        let bytes = field.bytes().await?;
        if bytes.len() > limits.max_resume_bytes {
            return Err(AppError::Validation(format!(
                "'{file_name}' must be at most {}.",
                human_size(limits.max_resume_bytes)
            )));
        }

        resume_data_uris.push(DataUri::encode(&mime, &bytes).to_string());
    }

    run_scoring(
        &state,
        ScoreResumesRequest {
            job_description,
            resume_data_uris,
        },
    )
    .await
    .map(Json)
}

async fn run_scoring(
    state: &AppState,
    request: ScoreResumesRequest,
) -> Result<ScoreResumesResponse, AppError> {
    let config = &state.config.scoring;
    let resumes = prepare_resumes(config, &request.job_description, request.resume_data_uris)?;

    let run_id = Uuid::new_v4();
    let span = info_span!("score_resumes", %run_id, resumes = resumes.len());
    let results = score_resumes(
        state.llm.as_ref(),
        config,
        &request.job_description,
        &resumes,
    )
    .instrument(span)
    .await;

    info!("Scoring run {run_id} produced {} results", results.len());

    Ok(ScoreResumesResponse {
        run_id,
        results,
        scored_at: Utc::now(),
    })
}
