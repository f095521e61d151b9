//! API route configuration.
//!
//! Shortening and the dashboard sit behind
//! [`crate::api::middleware::access_guard`]; redirects are open to everyone.

use crate::api::handlers::{
    dashboard_handler, method_not_allowed_handler, redirect_handler, shorten_handler,
};
use crate::api::middleware::access_guard;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// All routes mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`    - Create a short link (guarded)
/// - `GET  /dashboard`  - Stats, link summaries and recent clicks (guarded)
/// - `GET  /{code}`     - Redirect to the stored URL
///
/// Any other method on these paths answers 405. The guard only runs once the
/// method matched, so a wrong method is reported before bot or rate checks.
pub fn routes(state: AppState) -> Router<AppState> {
    let guard = middleware::from_fn_with_state(state, access_guard::layer);

    Router::new()
        .route(
            "/shorten",
            post(shorten_handler)
                .route_layer(guard.clone())
                .fallback(method_not_allowed_handler),
        )
        .route(
            "/dashboard",
            get(dashboard_handler)
                .route_layer(guard)
                .fallback(method_not_allowed_handler),
        )
        .route(
            "/{code}",
            get(redirect_handler).fallback(method_not_allowed_handler),
        )
}
