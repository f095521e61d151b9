//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tokio::sync::mpsc::error::TrySendError;
use tracing::warn;

use crate::api::extract::ClientContext;
use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /api/{code}`
///
/// # Request Flow
///
/// 1. Resolve `url:{code}` in the store
/// 2. Queue a click event for the background worker
/// 3. Return 302 Found with `Location` set to the stored URL
///
/// # Click Tracking
///
/// Click events go to a bounded channel. If the queue is full the click is
/// dropped with a warning and the redirect still succeeds.
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown.
/// Returns 500 if the store is not configured or unreachable.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    client: ClientContext,
) -> Result<Response, AppError> {
    let long_url = state.link_service.resolve(&code).await?;

    let location = HeaderValue::from_str(&long_url).map_err(|_| {
        AppError::internal(
            "Stored URL cannot be used as a redirect target",
            json!({ "code": code }),
        )
    })?;

    let event = ClickEvent::new(
        code,
        client.ip,
        client.user_agent.as_deref(),
        client.referer.as_deref(),
    );

    match state.click_tx.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            warn!("Click queue full, dropping click for {}", event.code);
        }
        Err(TrySendError::Closed(event)) => {
            warn!("Click queue closed, dropping click for {}", event.code);
        }
    }

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
