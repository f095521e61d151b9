//! Bot filtering and per-IP rate limiting.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::keys;
use crate::domain::repositories::KeyValueStore;

/// User-Agent fragments that mark a client as automated.
const BOT_MARKERS: [&str; 12] = [
    "bot",
    "crawler",
    "spider",
    "scraper",
    "curl",
    "wget",
    "python",
    "java",
    "perl",
    "ruby",
    "php",
    "go-http-client",
];

/// Returns `true` if `user_agent` contains a known automation marker.
///
/// Matching is a case-insensitive substring test, so `"Java"` also matches
/// browsers advertising `JavaScript` support.
pub fn is_bot(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    BOT_MARKERS.iter().any(|marker| ua.contains(marker))
}

/// Fixed-window request counter keyed by client IP.
///
/// The counter lives in the store under `rate_limit:{ip}`. Each allowed
/// request pushes the window expiry forward, so a steady client keeps its
/// count until it pauses for a whole window.
pub struct AccessGuard {
    store: Arc<dyn KeyValueStore>,
    max_requests: i64,
    window: Duration,
}

impl AccessGuard {
    pub fn new(store: Arc<dyn KeyValueStore>, max_requests: i64, window: Duration) -> Self {
        Self {
            store,
            max_requests,
            window,
        }
    }

    /// Counts a request from `ip`, returning `false` once the limit is reached.
    ///
    /// Fails open: if the counter cannot be read the request is allowed.
    pub async fn check_rate_limit(&self, ip: &str) -> bool {
        let key = keys::rate_limit_key(ip);

        let count = match self.store.get(&key).await {
            Ok(Some(raw)) => match raw.parse::<i64>() {
                Ok(count) => count,
                Err(_) => {
                    warn!("Rate limit counter for {} is not an integer", ip);
                    return true;
                }
            },
            Ok(None) => 0,
            Err(e) => {
                warn!("Rate limit check skipped for {}: {}", ip, e);
                return true;
            }
        };

        if count >= self.max_requests {
            debug!("Rate limit reached for {} ({} requests)", ip, count);
            return false;
        }

        if let Err(e) = self.store.incr(&key).await {
            warn!("Failed to increment rate limit for {}: {}", ip, e);
        }
        if let Err(e) = self.store.expire(&key, self.window).await {
            warn!("Failed to refresh rate limit window for {}: {}", ip, e);
        }

        true
    }
}
