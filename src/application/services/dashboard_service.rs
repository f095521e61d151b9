//! Dashboard aggregation service.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use tracing::{debug, warn};

use crate::domain::entities::{ClickRecord, Dashboard, DashboardStats, UrlLog};
use crate::domain::keys;
use crate::domain::repositories::KeyValueStore;
use crate::error::AppError;

/// Builds the dashboard view from the counters, link keys and click log.
pub struct DashboardService {
    store: Arc<dyn KeyValueStore>,
    url_limit: usize,
    click_limit: usize,
}

impl DashboardService {
    pub fn new(store: Arc<dyn KeyValueStore>, url_limit: usize, click_limit: usize) -> Self {
        Self {
            store,
            url_limit,
            click_limit,
        }
    }

    /// Collects stats, link summaries and recent clicks in one pass.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] or [`AppError::Store`] if the
    /// link keys or the global counters cannot be read.
    pub async fn dashboard(&self) -> Result<Dashboard, AppError> {
        let url_keys = self.store.scan_keys(keys::URL_KEY_PATTERN).await?;

        let stats = self.stats_for(url_keys.len()).await?;
        let url_logs = self.url_logs_for(&url_keys, self.url_limit).await;
        let click_logs = self.click_logs(self.click_limit).await?;

        Ok(Dashboard {
            stats,
            url_logs,
            click_logs,
        })
    }

    /// Aggregate counters only.
    pub async fn stats(&self) -> Result<DashboardStats, AppError> {
        let url_keys = self.store.scan_keys(keys::URL_KEY_PATTERN).await?;
        self.stats_for(url_keys.len()).await
    }

    /// Summaries of up to `limit` links, in discovery order.
    pub async fn url_logs(&self, limit: usize) -> Result<Vec<UrlLog>, AppError> {
        let url_keys = self.store.scan_keys(keys::URL_KEY_PATTERN).await?;
        Ok(self.url_logs_for(&url_keys, limit).await)
    }

    /// The newest `limit` click records, newest first.
    ///
    /// Records that do not parse are skipped.
    pub async fn click_logs(&self, limit: usize) -> Result<Vec<ClickRecord>, AppError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let stop = isize::try_from(limit).unwrap_or(isize::MAX) - 1;
        let raw = self.store.zrevrange(keys::CLICK_LOG_KEY, 0, stop).await?;

        let records: Vec<ClickRecord> = raw
            .iter()
            .filter_map(|entry| {
                let record = ClickRecord::parse(entry);
                if record.is_none() {
                    debug!("Skipping malformed click record");
                }
                record
            })
            .collect();

        Ok(records)
    }

    async fn stats_for(&self, total_urls: usize) -> Result<DashboardStats, AppError> {
        let today = keys::daily_clicks_key(Local::now().date_naive());

        Ok(DashboardStats {
            total_urls: i64::try_from(total_urls).unwrap_or(i64::MAX),
            total_clicks: self.counter(keys::TOTAL_CLICKS_KEY).await?,
            today_clicks: self.counter(&today).await?,
            unique_visitors: self.store.scard(keys::UNIQUE_VISITORS_KEY).await?,
        })
    }

    /// Reads an integer counter; a missing key counts as zero.
    async fn counter(&self, key: &str) -> Result<i64, AppError> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(0);
        };

        Ok(raw.parse().unwrap_or_else(|_| {
            warn!("Counter {} holds a non-integer value", key);
            0
        }))
    }

    async fn url_logs_for(&self, url_keys: &[String], limit: usize) -> Vec<UrlLog> {
        let mut logs = Vec::with_capacity(limit.min(url_keys.len()));

        for key in url_keys {
            if logs.len() >= limit {
                break;
            }
            let Some(code) = keys::code_from_url_key(key) else {
                continue;
            };

            match self.url_log(code).await {
                Some(log) => logs.push(log),
                None => debug!("Skipping unreadable link {}", code),
            }
        }

        logs
    }

    /// Summary of one link, `None` if its target cannot be read.
    async fn url_log(&self, code: &str) -> Option<UrlLog> {
        let long_url = match self.store.get(&keys::url_key(code)).await {
            Ok(Some(url)) => url,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read link {}: {}", code, e);
                return None;
            }
        };

        let clicks = self
            .store
            .get(&keys::clicks_key(code))
            .await
            .ok()
            .flatten()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0);

        let created_at = self
            .timestamp(&keys::created_key(code))
            .await
            .unwrap_or_else(Utc::now);
        let last_click = self.timestamp(&keys::last_click_key(code)).await;

        Some(UrlLog {
            code: code.to_string(),
            long_url,
            clicks,
            created_at,
            last_click,
        })
    }

    async fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        let raw = self.store.get(key).await.ok().flatten()?;
        DateTime::parse_from_rfc3339(&raw)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockKeyValueStore, StoreError};
    use crate::infrastructure::store::MemoryStore;

    async fn seed_link(store: &MemoryStore, code: &str, url: &str, clicks: i64) {
        store.set(&keys::url_key(code), url).await.unwrap();
        store
            .set(&keys::created_key(code), "2024-05-01T10:00:00Z")
            .await
            .unwrap();
        for _ in 0..clicks {
            store.incr(&keys::clicks_key(code)).await.unwrap();
            store.incr(keys::TOTAL_CLICKS_KEY).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_empty_store_reads_as_zero() {
        let store = Arc::new(MemoryStore::new());
        let service = DashboardService::new(store, 50, 100);

        let dashboard = service.dashboard().await.unwrap();

        assert_eq!(dashboard.stats, DashboardStats::default());
        assert!(dashboard.url_logs.is_empty());
        assert!(dashboard.click_logs.is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_lists_links_with_counts() {
        let store = Arc::new(MemoryStore::new());
        seed_link(&store, "aaa111", "https://a.example.com", 3).await;
        seed_link(&store, "bbb222", "https://b.example.com", 2).await;
        store
            .set(&keys::last_click_key("aaa111"), "2024-05-02T08:30:00Z")
            .await
            .unwrap();

        let service = DashboardService::new(store, 50, 100);
        let dashboard = service.dashboard().await.unwrap();

        assert_eq!(dashboard.stats.total_urls, 2);
        assert_eq!(dashboard.stats.total_clicks, 5);

        let a = dashboard.url_logs.iter().find(|l| l.code == "aaa111").unwrap();
        assert_eq!(a.long_url, "https://a.example.com");
        assert_eq!(a.clicks, 3);
        assert_eq!(a.created_at.to_rfc3339(), "2024-05-01T10:00:00+00:00");
        assert!(a.last_click.is_some());

        let b = dashboard.url_logs.iter().find(|l| l.code == "bbb222").unwrap();
        assert_eq!(b.clicks, 2);
        assert_eq!(b.last_click, None);
    }

    #[tokio::test]
    async fn test_missing_created_time_reads_as_now() {
        let store = Arc::new(MemoryStore::new());
        store.set(&keys::url_key("legacy"), "https://old.example.com").await.unwrap();

        let before = Utc::now();
        let service = DashboardService::new(store, 50, 100);
        let logs = service.url_logs(50).await.unwrap();

        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].clicks, 0);
        assert!(logs[0].created_at >= before - chrono::Duration::seconds(1));
    }

    #[tokio::test]
    async fn test_url_logs_respect_limit() {
        let store = Arc::new(MemoryStore::new());
        for i in 0..8 {
            seed_link(&store, &format!("code{i:02}"), "https://example.com", 0).await;
        }

        let service = DashboardService::new(store, 3, 100);
        let dashboard = service.dashboard().await.unwrap();

        assert_eq!(dashboard.stats.total_urls, 8);
        assert_eq!(dashboard.url_logs.len(), 3);
    }

    #[tokio::test]
    async fn test_click_logs_newest_first_skipping_malformed() {
        let store = Arc::new(MemoryStore::new());
        store
            .zadd(
                keys::CLICK_LOG_KEY,
                r#"{"code":"old","ip":"1.1.1.1","user_agent":"","referer":"","timestamp":"2024-05-01T10:00:00Z"}"#,
                1.0,
            )
            .await
            .unwrap();
        store.zadd(keys::CLICK_LOG_KEY, "not json", 2.0).await.unwrap();
        store
            .zadd(
                keys::CLICK_LOG_KEY,
                r#"{"code":"new","ip":"2.2.2.2","user_agent":"","referer":"","timestamp":"2024-05-01T10:00:03Z"}"#,
                3.0,
            )
            .await
            .unwrap();

        let service = DashboardService::new(store, 50, 100);
        let records = service.click_logs(100).await.unwrap();

        let codes: Vec<&str> = records.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, ["new", "old"]);
    }

    #[tokio::test]
    async fn test_click_logs_limit() {
        let store = Arc::new(MemoryStore::new());
        let service = DashboardService::new(store, 50, 100);

        assert!(service.click_logs(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scan_failure_is_store_error() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_scan_keys()
            .times(1)
            .returning(|_| Err(StoreError::Connection("refused".to_string())));

        let service = DashboardService::new(Arc::new(store), 50, 100);

        assert!(matches!(
            service.dashboard().await,
            Err(AppError::Store { .. })
        ));
    }

    #[tokio::test]
    async fn test_unreadable_link_is_skipped() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_scan_keys()
            .returning(|_| Ok(vec!["url:good".to_string(), "url:bad".to_string()]));
        store.expect_get().returning(|key| match key {
            "url:good" => Ok(Some("https://example.com".to_string())),
            "url:bad" => Err(StoreError::Operation("WRONGTYPE".to_string())),
            "clicks:good" => Ok(Some("7".to_string())),
            _ => Ok(None),
        });

        let service = DashboardService::new(Arc::new(store), 50, 100);
        let logs = service.url_logs(50).await.unwrap();

        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].code, "good");
        assert_eq!(logs[0].clicks, 7);
    }

    #[tokio::test]
    async fn test_skipped_link_does_not_use_up_limit() {
        let mut store = MockKeyValueStore::new();
        store.expect_scan_keys().returning(|_| {
            Ok(vec![
                "url:bad".to_string(),
                "url:one".to_string(),
                "url:two".to_string(),
                "url:three".to_string(),
            ])
        });
        store.expect_get().returning(|key| match key {
            "url:bad" => Err(StoreError::Operation("WRONGTYPE".to_string())),
            "url:one" | "url:two" | "url:three" => Ok(Some("https://example.com".to_string())),
            _ => Ok(None),
        });

        let service = DashboardService::new(Arc::new(store), 50, 100);
        let logs = service.url_logs(2).await.unwrap();

        let codes: Vec<&str> = logs.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, ["one", "two"]);
    }
}
