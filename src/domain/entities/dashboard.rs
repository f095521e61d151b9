//! Dashboard aggregates.

use chrono::{DateTime, Utc};

use super::ClickRecord;

/// Aggregate counters shown at the top of the dashboard.
///
/// Every counter reads as zero when its key does not exist yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_urls: i64,
    pub total_clicks: i64,
    pub today_clicks: i64,
    pub unique_visitors: i64,
}

/// Summary of a single short link.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlLog {
    pub code: String,
    pub long_url: String,
    pub clicks: i64,
    /// Falls back to the read time for links created without a timestamp.
    pub created_at: DateTime<Utc>,
    pub last_click: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub url_logs: Vec<UrlLog>,
    pub click_logs: Vec<ClickRecord>,
}
