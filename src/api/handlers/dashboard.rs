//! Handler for the dashboard endpoint.

use axum::{Json, extract::State};

use crate::api::dto::dashboard::DashboardResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns aggregate stats, link summaries and the most recent clicks.
///
/// # Endpoint
///
/// `GET /api/dashboard`
///
/// # Errors
///
/// Returns 500 if the store is not configured or the counters cannot be read.
pub async fn dashboard_handler(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let dashboard = state.dashboard_service.dashboard().await?;

    Ok(Json(dashboard.into()))
}
