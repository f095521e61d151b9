//! Client metadata extractor.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{Extensions, HeaderMap, header, request::Parts};

use crate::utils::client_ip::extract_client_ip;

/// Who sent the request: client IP plus the `User-Agent` and `Referer` headers.
///
/// The peer address is taken from `ConnectInfo` when the server was started
/// with connect info and ignored otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientContext {
    pub ip: String,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

impl ClientContext {
    pub fn from_request_meta(headers: &HeaderMap, extensions: &Extensions) -> Self {
        let peer = extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Self {
            ip: extract_client_ip(headers, peer),
            user_agent: header_string(headers, header::USER_AGENT),
            referer: header_string(headers, header::REFERER),
        }
    }

    /// User-Agent, or an empty string when the header is absent.
    pub fn user_agent_or_empty(&self) -> &str {
        self.user_agent.as_deref().unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for ClientContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_request_meta(&parts.headers, &parts.extensions))
    }
}

fn header_string(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
