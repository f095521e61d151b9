//! Store used when no usable Redis endpoint is configured.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::domain::repositories::{KeyValueStore, StoreError, StoreResult};

/// A store whose every operation fails with [`StoreError::NotConfigured`].
///
/// Lets the server start without Redis: handlers answer with a
/// configuration error instead of the process refusing to boot.
pub struct UnconfiguredStore {
    reason: String,
}

impl UnconfiguredStore {
    pub fn new(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        debug!("Using UnconfiguredStore ({})", reason);
        Self { reason }
    }

    fn fail<T>(&self) -> StoreResult<T> {
        Err(StoreError::NotConfigured(self.reason.clone()))
    }
}

#[async_trait]
impl KeyValueStore for UnconfiguredStore {
    async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        self.fail()
    }

    async fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
        self.fail()
    }

    async fn set_nx(&self, _key: &str, _value: &str) -> StoreResult<bool> {
        self.fail()
    }

    async fn incr(&self, _key: &str) -> StoreResult<i64> {
        self.fail()
    }

    async fn expire(&self, _key: &str, _ttl: Duration) -> StoreResult<()> {
        self.fail()
    }

    async fn sadd(&self, _key: &str, _member: &str) -> StoreResult<()> {
        self.fail()
    }

    async fn scard(&self, _key: &str) -> StoreResult<i64> {
        self.fail()
    }

    async fn zadd(&self, _key: &str, _member: &str, _score: f64) -> StoreResult<()> {
        self.fail()
    }

    async fn zrevrange(&self, _key: &str, _start: isize, _stop: isize) -> StoreResult<Vec<String>> {
        self.fail()
    }

    async fn zremrangebyrank(&self, _key: &str, _start: isize, _stop: isize) -> StoreResult<()> {
        self.fail()
    }

    async fn scan_keys(&self, _pattern: &str) -> StoreResult<Vec<String>> {
        self.fail()
    }

    async fn ping(&self) -> StoreResult<()> {
        self.fail()
    }
}
