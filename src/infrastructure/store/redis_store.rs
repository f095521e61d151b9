//! Redis-backed store implementation.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisResult, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info};

use crate::domain::repositories::{KeyValueStore, StoreError, StoreResult};

/// Number of keys requested per SCAN round trip.
const SCAN_BATCH: usize = 500;

/// Redis store shared by the whole process.
///
/// Uses a single `ConnectionManager` (cloned per call, reconnecting on
/// failure) and bounds every command with `op_timeout`.
pub struct RedisStore {
    client: ConnectionManager,
    op_timeout: Duration,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `op_timeout` - deadline applied to every subsequent command
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotConfigured`] if the URL cannot be parsed and
    /// [`StoreError::Connection`] if the server cannot be reached.
    pub async fn connect(redis_url: &str, op_timeout: Duration) -> StoreResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| StoreError::NotConfigured(format!("Invalid Redis URL: {}", e)))?;

        let manager = tokio::time::timeout(op_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| StoreError::Timeout {
                operation: "CONNECT",
                after: op_timeout,
            })?
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let store = Self {
            client: manager,
            op_timeout,
        };
        store.ping().await?;

        info!("✓ Connected to Redis");

        Ok(store)
    }

    /// Runs a command under the configured deadline.
    async fn run<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = RedisResult<T>>,
    ) -> StoreResult<T> {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) if e.is_io_error() || e.is_connection_dropped() => {
                Err(StoreError::Connection(format!("{}: {}", operation, e)))
            }
            Ok(Err(e)) => Err(StoreError::Operation(format!("{}: {}", operation, e))),
            Err(_) => Err(StoreError::Timeout {
                operation,
                after: self.op_timeout,
            }),
        }
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.client.clone();
        self.run("GET", conn.get::<_, Option<String>>(key)).await
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut conn = self.client.clone();
        self.run("SET", conn.set::<_, _, ()>(key, value)).await
    }

    async fn set_nx(&self, key: &str, value: &str) -> StoreResult<bool> {
        let mut conn = self.client.clone();
        self.run("SETNX", conn.set_nx::<_, _, bool>(key, value))
            .await
    }

    async fn incr(&self, key: &str) -> StoreResult<i64> {
        let mut conn = self.client.clone();
        self.run("INCR", conn.incr::<_, _, i64>(key, 1)).await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> StoreResult<()> {
        let mut conn = self.client.clone();
        let seconds = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        self.run("EXPIRE", conn.expire::<_, ()>(key, seconds)).await
    }

    async fn sadd(&self, key: &str, member: &str) -> StoreResult<()> {
        let mut conn = self.client.clone();
        self.run("SADD", conn.sadd::<_, _, ()>(key, member)).await
    }

    async fn scard(&self, key: &str) -> StoreResult<i64> {
        let mut conn = self.client.clone();
        self.run("SCARD", conn.scard::<_, i64>(key)).await
    }

    async fn zadd(&self, key: &str, member: &str, score: f64) -> StoreResult<()> {
        let mut conn = self.client.clone();
        self.run("ZADD", conn.zadd::<_, _, _, ()>(key, member, score))
            .await
    }

    async fn zrevrange(&self, key: &str, start: isize, stop: isize) -> StoreResult<Vec<String>> {
        let mut conn = self.client.clone();
        self.run("ZREVRANGE", conn.zrevrange::<_, Vec<String>>(key, start, stop))
            .await
    }

    async fn zremrangebyrank(&self, key: &str, start: isize, stop: isize) -> StoreResult<()> {
        let mut conn = self.client.clone();
        self.run(
            "ZREMRANGEBYRANK",
            conn.zremrangebyrank::<_, ()>(key, start, stop),
        )
        .await
    }

    async fn scan_keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        let mut conn = self.client.clone();
        let mut cursor: u64 = 0;
        let mut keys = Vec::new();

        loop {
            let mut cmd = redis::cmd("SCAN");
            cmd.arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH);

            let (next, batch): (u64, Vec<String>) =
                self.run("SCAN", cmd.query_async(&mut conn)).await?;

            keys.extend(batch);
            cursor = next;

            if cursor == 0 {
                break;
            }
        }

        // SCAN may return a key more than once
        keys.sort_unstable();
        keys.dedup();

        debug!("SCAN {} matched {} keys", pattern, keys.len());

        Ok(keys)
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.client.clone();
        self.run("PING", conn.ping::<()>()).await
    }
}
