//! Bot filtering and rate limiting middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::json;
use tracing::debug;

use crate::api::extract::ClientContext;
use crate::application::services::access_guard::is_bot;
use crate::{error::AppError, state::AppState};

/// Rejects automated clients and clients over their request budget.
///
/// # Checks
///
/// 1. `User-Agent` matches a bot marker: `403 Forbidden`
/// 2. Per-IP counter at its limit: `429 Too Many Requests`
///
/// A request without a `User-Agent` passes the bot check.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::post, middleware};
/// use crate::api::middleware::access_guard;
///
/// let guarded = Router::new().route(
///     "/shorten",
///     post(shorten_handler)
///         .route_layer(middleware::from_fn_with_state(state.clone(), access_guard::layer)),
/// );
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let client = ClientContext::from_request_meta(req.headers(), req.extensions());

    if is_bot(client.user_agent_or_empty()) {
        debug!("Blocked bot {} ({})", client.ip, client.user_agent_or_empty());
        return Err(AppError::forbidden(
            "Automated clients are not allowed",
            json!({ "user_agent": client.user_agent_or_empty() }),
        ));
    }

    if !st.access_guard.check_rate_limit(&client.ip).await {
        return Err(AppError::rate_limited(
            "Too many requests",
            json!({ "ip": client.ip }),
        ));
    }

    Ok(next.run(req).await)
}
