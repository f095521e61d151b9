//! Client IP extraction from proxy headers.

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Headers consulted, in order, before falling back to the peer address.
const FORWARDING_HEADERS: &[&str] = &["x-forwarded-for", "x-real-ip", "cf-connecting-ip"];

/// Used when neither headers nor the peer address identify the client.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Determines the client IP for a request.
///
/// Checks `X-Forwarded-For`, `X-Real-IP` and `CF-Connecting-IP` in that
/// order and returns the first comma-separated value of the first non-empty
/// header. Falls back to the socket peer IP, then to [`UNKNOWN_CLIENT`].
///
/// Headers are trusted as sent; the service is expected to run behind a
/// proxy that overwrites them.
pub fn extract_client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    for name in FORWARDING_HEADERS {
        let Some(value) = headers.get(*name).and_then(|v| v.to_str().ok()) else {
            continue;
        };

        if value.is_empty() {
            continue;
        }

        let first = value.split(',').next().unwrap_or(value).trim();
        if !first.is_empty() {
            return first.to_string();
        }
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}
