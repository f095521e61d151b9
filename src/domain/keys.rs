//! Logical key layout in the key-value store.
//!
//! - `url:{code}` - target URL
//! - `created:{code}` - RFC 3339 creation time
//! - `clicks:{code}` - per-code click counter
//! - `last_click:{code}` - RFC 3339 time of the latest click
//! - `stats:total_clicks` - global click counter
//! - `stats:clicks:{YYYY-MM-DD}` - per-day click counter
//! - `stats:unique_visitors` - set of visitor IPs
//! - `click_logs` - sorted set of JSON click records scored by Unix seconds
//! - `rate_limit:{ip}` - per-IP request counter

use chrono::NaiveDate;

const URL_PREFIX: &str = "url:";

/// Glob pattern matching every mapping key.
pub const URL_KEY_PATTERN: &str = "url:*";
pub const TOTAL_CLICKS_KEY: &str = "stats:total_clicks";
pub const UNIQUE_VISITORS_KEY: &str = "stats:unique_visitors";
pub const CLICK_LOG_KEY: &str = "click_logs";

pub fn url_key(code: &str) -> String {
    format!("{URL_PREFIX}{code}")
}

/// Extracts the short code from a mapping key, `None` for any other key.
pub fn code_from_url_key(key: &str) -> Option<&str> {
    key.strip_prefix(URL_PREFIX)
}

pub fn created_key(code: &str) -> String {
    format!("created:{code}")
}

pub fn clicks_key(code: &str) -> String {
    format!("clicks:{code}")
}

pub fn last_click_key(code: &str) -> String {
    format!("last_click:{code}")
}

pub fn daily_clicks_key(date: NaiveDate) -> String {
    format!("stats:clicks:{}", date.format("%Y-%m-%d"))
}

pub fn rate_limit_key(ip: &str) -> String {
    format!("rate_limit:{ip}")
}
