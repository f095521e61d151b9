//! DTOs for the dashboard endpoint.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::domain::entities::{ClickRecord, Dashboard, DashboardStats, UrlLog};

/// Dashboard payload.
///
/// ```json
/// {
///   "stats": { "total_urls": 2, "total_clicks": 5, "today_clicks": 5, "unique_visitors": 1 },
///   "url_logs": [
///     { "code": "abc123", "long_url": "https://example.com", "clicks": 3,
///       "created_at": "2024-05-01T10:00:00Z", "last_click": "0001-01-01T00:00:00Z" }
///   ],
///   "click_logs": [
///     { "code": "abc123", "ip": "1.2.3.4", "user_agent": "Mozilla/5.0",
///       "referer": "", "timestamp": "2024-05-01T10:05:00Z" }
///   ]
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub stats: StatsDto,
    pub url_logs: Vec<UrlLogDto>,
    pub click_logs: Vec<ClickLogDto>,
}

#[derive(Debug, Serialize)]
pub struct StatsDto {
    pub total_urls: i64,
    pub total_clicks: i64,
    pub today_clicks: i64,
    pub unique_visitors: i64,
}

#[derive(Debug, Serialize)]
pub struct UrlLogDto {
    pub code: String,
    pub long_url: String,
    pub clicks: i64,
    pub created_at: String,
    pub last_click: String,
}

#[derive(Debug, Serialize)]
pub struct ClickLogDto {
    pub code: String,
    pub ip: String,
    pub user_agent: String,
    pub referer: String,
    pub timestamp: String,
}

/// `last_click` of a link that was never clicked.
pub const NEVER_CLICKED: &str = "0001-01-01T00:00:00Z";

fn rfc3339(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl From<DashboardStats> for StatsDto {
    fn from(s: DashboardStats) -> Self {
        Self {
            total_urls: s.total_urls,
            total_clicks: s.total_clicks,
            today_clicks: s.today_clicks,
            unique_visitors: s.unique_visitors,
        }
    }
}

impl From<UrlLog> for UrlLogDto {
    fn from(log: UrlLog) -> Self {
        Self {
            code: log.code,
            long_url: log.long_url,
            clicks: log.clicks,
            created_at: rfc3339(log.created_at),
            last_click: log
                .last_click
                .map_or_else(|| NEVER_CLICKED.to_string(), rfc3339),
        }
    }
}

impl From<ClickRecord> for ClickLogDto {
    fn from(r: ClickRecord) -> Self {
        Self {
            code: r.code,
            ip: r.ip,
            user_agent: r.user_agent,
            referer: r.referer,
            timestamp: rfc3339(r.timestamp),
        }
    }
}

impl From<Dashboard> for DashboardResponse {
    fn from(d: Dashboard) -> Self {
        Self {
            stats: d.stats.into(),
            url_logs: d.url_logs.into_iter().map(Into::into).collect(),
            click_logs: d.click_logs.into_iter().map(Into::into).collect(),
        }
    }
}
