//! Click event model for asynchronous click tracking.

use chrono::{DateTime, Local, Utc};

use super::entities::ClickRecord;

/// An in-memory representation of a click event for async processing.
///
/// Created by the redirect handler and passed to the background worker via
/// a channel, so the redirect response never waits on analytics writes.
///
/// # Usage Flow
///
/// 1. Created in redirect handler with request metadata
/// 2. Sent to channel (non-blocking)
/// 3. Processed by [`crate::domain::click_worker::run_click_worker`]
/// 4. Recorded by [`crate::application::services::ClickService::record`]
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub code: String,
    pub ip: String,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    /// Captured in the handler so queueing delay never shifts the daily bucket.
    pub clicked_at: DateTime<Local>,
}

impl ClickEvent {
    /// Creates a new click event stamped with the current local time.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let event = ClickEvent::new(
    ///     "abc123".to_string(),
    ///     "192.168.1.1".to_string(),
    ///     Some("Mozilla/5.0"),
    ///     Some("https://google.com"),
    /// );
    /// ```
    pub fn new(code: String, ip: String, user_agent: Option<&str>, referer: Option<&str>) -> Self {
        Self {
            code,
            ip,
            user_agent: user_agent.map(|s| s.to_string()),
            referer: referer.map(|s| s.to_string()),
            clicked_at: Local::now(),
        }
    }

    /// Overrides the click time.
    pub fn at(mut self, clicked_at: DateTime<Local>) -> Self {
        self.clicked_at = clicked_at;
        self
    }

    /// Builds the record persisted in the recent-click log.
    pub fn to_record(&self) -> ClickRecord {
        ClickRecord {
            code: self.code.clone(),
            ip: self.ip.clone(),
            user_agent: self.user_agent.clone().unwrap_or_default(),
            referer: self.referer.clone().unwrap_or_default(),
            timestamp: self.clicked_at.with_timezone(&Utc),
        }
    }
}
