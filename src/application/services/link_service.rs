//! Link creation and resolution service.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::ShortenedLink;
use crate::domain::keys;
use crate::domain::repositories::KeyValueStore;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;

/// Service for creating and resolving shortened links.
///
/// Target URLs are stored verbatim: any non-empty string is accepted.
pub struct LinkService {
    store: Arc<dyn KeyValueStore>,
    code_length: usize,
}

impl LinkService {
    /// Creates a new link service generating codes of `code_length` characters.
    pub fn new(store: Arc<dyn KeyValueStore>, code_length: usize) -> Self {
        Self { store, code_length }
    }

    /// Shortens `long_url` and builds its public short URL for `host`.
    ///
    /// Writes the mapping and the creation timestamp. A failure to write the
    /// timestamp is logged and does not fail the request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidRequest`] if `long_url` is empty.
    /// Returns [`AppError::Configuration`] or [`AppError::Store`] if the
    /// mapping cannot be written.
    pub async fn shorten(&self, long_url: &str, host: &str) -> Result<ShortenedLink, AppError> {
        if long_url.is_empty() {
            return Err(AppError::invalid_request(
                "Invalid request",
                json!({ "reason": "url must not be empty" }),
            ));
        }

        let code = self.allocate_code(long_url).await?;

        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        if let Err(e) = self.store.set(&keys::created_key(&code), &created_at).await {
            warn!("Failed to record creation time for {}: {}", code, e);
        }

        info!("Created short link {} -> {}", code, long_url);

        Ok(ShortenedLink {
            short_url: build_short_url(host, &code),
            code,
            long_url: long_url.to_string(),
        })
    }

    /// Reserves a fresh code and binds it to `long_url` in one atomic write.
    ///
    /// Candidates are written with set-if-not-exists, so two concurrent
    /// callers can never bind the same code. Retries until a free code is
    /// found; store errors end the loop.
    pub async fn allocate_code(&self, long_url: &str) -> Result<String, AppError> {
        loop {
            let code = generate_code(self.code_length);

            if self.store.set_nx(&keys::url_key(&code), long_url).await? {
                return Ok(code);
            }

            debug!("Code collision on {}, retrying", code);
        }
    }

    /// Resolves a short code to its target URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is empty or unknown.
    /// Returns [`AppError::Configuration`] if the store is not configured.
    /// Returns [`AppError::Store`] on any other store failure.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        if code.is_empty() {
            return Err(AppError::not_found("Short link not found", json!({ "code": code })));
        }

        self.store
            .get(&keys::url_key(code))
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }
}

/// Constructs the public short URL `{scheme}://{host}/api/{code}`.
///
/// Uses plain HTTP for `localhost` and `127.0.0.1` hosts and HTTPS otherwise.
pub fn build_short_url(host: &str, code: &str) -> String {
    let scheme = if host.starts_with("localhost") || host.starts_with("127.0.0.1") {
        "http"
    } else {
        "https"
    };

    format!("{}://{}/api/{}", scheme, host, code)
}
