//! Public host extraction from HTTP requests.

use crate::AppError;
use axum::http::{HeaderMap, Uri, header};

/// Returns the host (with port, if any) the client addressed.
///
/// Prefers the `Host` header and falls back to the URI authority, which is
/// where HTTP/2 clients put it.
///
/// # Errors
///
/// Returns [`AppError::InvalidRequest`] if:
/// - Neither a `Host` header nor a URI authority is present
/// - The header value contains invalid UTF-8
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "localhost:3000".parse().unwrap());
///
/// let host = extract_host(&headers, &Uri::from_static("/api/shorten")).unwrap();
/// assert_eq!(host, "localhost:3000");
/// ```
pub fn extract_host(headers: &HeaderMap, uri: &Uri) -> Result<String, AppError> {
    if let Some(value) = headers.get(header::HOST) {
        let host = value
            .to_str()
            .map_err(|_| AppError::invalid_request("Invalid Host header", serde_json::json!({})))?;

        if !host.is_empty() {
            return Ok(host.to_string());
        }
    }

    uri.authority()
        .map(|authority| authority.as_str().to_string())
        .ok_or_else(|| AppError::invalid_request("Missing Host header", serde_json::json!({})))
}
