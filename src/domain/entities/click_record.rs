//! Click record stored in the recent-click log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single click as serialized (JSON) into the recent-click log.
///
/// Header-derived fields are empty strings when the header was absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickRecord {
    pub code: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub user_agent: String,
    #[serde(default)]
    pub referer: String,
    pub timestamp: DateTime<Utc>,
}

impl ClickRecord {
    /// Parses a stored record, `None` if it is not a valid record.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}
