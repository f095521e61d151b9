//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `/api/*`   - Shortening, dashboard and redirects
//! - `/health`  - Health check: store and click queue
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Access guard** - Bot filter and per-IP rate limit on shorten and dashboard
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, not_found_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Application router without path normalization.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api::routes::routes(state.clone()))
        .route("/health", get(health_handler))
        .fallback(not_found_handler)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// Trailing slashes are trimmed before routing, so `/api/abc123/` resolves
/// like `/api/abc123`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
