//! Axum route handlers for the Screening API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::screening::screener::{conduct_screening, ScreeningOutcome, ScreeningRequest};
use crate::state::AppState;

/// POST /api/v1/screenings
///
/// Runs a simulated screening conversation and returns the pass/fail decision.
pub async fn handle_screening(
    State(state): State<AppState>,
    Json(request): Json<ScreeningRequest>,
) -> Result<Json<ScreeningOutcome>, AppError> {
    let outcome = conduct_screening(state.llm.as_ref(), &request).await?;
    Ok(Json(outcome))
}
