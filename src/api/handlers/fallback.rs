//! JSON error responses for unmatched requests.

use axum::http::{Method, Uri};
use serde_json::json;

use crate::error::AppError;

/// Router fallback for unknown paths.
pub async fn not_found_handler(uri: Uri) -> AppError {
    AppError::not_found("Route not found", json!({ "path": uri.path() }))
}

/// Method fallback for known paths.
pub async fn method_not_allowed_handler(method: Method, uri: Uri) -> AppError {
    AppError::method_not_allowed(
        "Method not allowed",
        json!({ "method": method.as_str(), "path": uri.path() }),
    )
}
