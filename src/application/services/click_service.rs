//! Click accounting.

use std::sync::Arc;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use tracing::warn;

use crate::domain::click_event::ClickEvent;
use crate::domain::keys;
use crate::domain::repositories::{KeyValueStore, StoreResult};

/// Updates counters, the visitor set and the recent-click log for each click.
///
/// Writes are independent: a failing step is logged and the remaining steps
/// still run, so a click can be partially recorded. Nothing is reported back
/// to the redirect that triggered it.
pub struct ClickService {
    store: Arc<dyn KeyValueStore>,
    log_capacity: usize,
    visitor_ttl: Duration,
}

impl ClickService {
    /// Creates a click service keeping `log_capacity` recent clicks and
    /// expiring the visitor set `visitor_ttl` after the latest visit.
    pub fn new(store: Arc<dyn KeyValueStore>, log_capacity: usize, visitor_ttl: Duration) -> Self {
        Self {
            store,
            log_capacity,
            visitor_ttl,
        }
    }

    /// Records a single click.
    pub async fn record(&self, event: &ClickEvent) {
        let code = event.code.as_str();
        let clicked_at = event.clicked_at.with_timezone(&Utc);

        self.attempt("per-code counter", code, self.store.incr(&keys::clicks_key(code)))
            .await;
        self.attempt("total counter", code, self.store.incr(keys::TOTAL_CLICKS_KEY))
            .await;
        self.attempt(
            "daily counter",
            code,
            self.store
                .incr(&keys::daily_clicks_key(event.clicked_at.date_naive())),
        )
        .await;
        self.attempt(
            "last click time",
            code,
            self.store.set(
                &keys::last_click_key(code),
                &clicked_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
        )
        .await;

        self.attempt(
            "unique visitor",
            code,
            self.store.sadd(keys::UNIQUE_VISITORS_KEY, &event.ip),
        )
        .await;
        self.attempt(
            "unique visitor expiry",
            code,
            self.store.expire(keys::UNIQUE_VISITORS_KEY, self.visitor_ttl),
        )
        .await;

        let record = match serde_json::to_string(&event.to_record()) {
            Ok(record) => record,
            Err(e) => {
                warn!("Failed to serialize click record for {}: {}", code, e);
                return;
            }
        };

        self.attempt(
            "click log",
            code,
            self.store
                .zadd(keys::CLICK_LOG_KEY, &record, clicked_at.timestamp() as f64),
        )
        .await;

        self.attempt(
            "click log trim",
            code,
            self.store
                .zremrangebyrank(keys::CLICK_LOG_KEY, 0, self.trim_stop()),
        )
        .await;
    }

    /// Last rank removed by the trim: everything below the newest `log_capacity`.
    ///
    /// A capacity beyond `isize` range trims nothing.
    fn trim_stop(&self) -> isize {
        isize::try_from(self.log_capacity)
            .ok()
            .and_then(|capacity| capacity.checked_add(1))
            .map_or(isize::MIN, |keep| -keep)
    }

    async fn attempt<T>(
        &self,
        step: &'static str,
        code: &str,
        fut: impl Future<Output = StoreResult<T>>,
    ) {
        if let Err(e) = fut.await {
            warn!("Click accounting step '{}' failed for {}: {}", step, code, e);
        }
    }
}
