//! Handler for link shortening endpoint.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Uri},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_host::extract_host;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/page" }
/// ```
///
/// # Response
///
/// ```json
/// { "short_url": "https://s.example.com/api/aZ3kQ9" }
/// ```
///
/// The short URL is built from the `Host` the client addressed, over plain
/// HTTP for `localhost`/`127.0.0.1` and HTTPS otherwise.
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not JSON, lacks `url`, or `url`
/// is empty. The `Content-Type` header is not checked.
/// Returns 500 if the store is not configured or a write fails.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    body: Bytes,
) -> Result<Json<ShortenResponse>, AppError> {
    let payload: ShortenRequest = serde_json::from_slice(&body).map_err(|e| {
        AppError::invalid_request("Invalid request", json!({ "reason": e.to_string() }))
    })?;
    payload.validate()?;

    let host = extract_host(&headers, &uri)?;

    let link = state.link_service.shorten(&payload.url, &host).await?;

    Ok(Json(ShortenResponse {
        short_url: link.short_url,
    }))
}
