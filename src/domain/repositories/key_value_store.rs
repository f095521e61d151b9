//! Key-value store contract used by every service.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by a [`KeyValueStore`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store endpoint is unset, unparsable, or was unreachable at startup.
    #[error("store not configured: {0}")]
    NotConfigured(String),

    #[error("store connection error: {0}")]
    Connection(String),

    /// The command reached the store but failed (wrong type, bad value, ...).
    #[error("store operation error: {0}")]
    Operation(String),

    #[error("store operation `{operation}` timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Atomic key-value primitives the service is built on.
///
/// Semantics follow Redis: missing keys read as `None`/zero, `incr` on a
/// missing key starts at zero, `set` clears any expiry, and sorted-set ranks
/// accept negative indices counted from the end.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisStore`] - production backend
/// - [`crate::infrastructure::store::MemoryStore`] - in-process backend for tests
/// - [`crate::infrastructure::store::UnconfiguredStore`] - fails every call
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads a string value.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes a string value without expiry.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Writes a string value only if the key does not exist.
    ///
    /// Returns `true` when the value was written.
    async fn set_nx(&self, key: &str, value: &str) -> StoreResult<bool>;

    /// Increments an integer value by one and returns the new value.
    async fn incr(&self, key: &str) -> StoreResult<i64>;

    /// Sets (or resets) the time-to-live of an existing key.
    async fn expire(&self, key: &str, ttl: Duration) -> StoreResult<()>;

    /// Adds a member to a set.
    async fn sadd(&self, key: &str, member: &str) -> StoreResult<()>;

    /// Returns the cardinality of a set, zero when missing.
    async fn scard(&self, key: &str) -> StoreResult<i64>;

    /// Adds (or re-scores) a member of a sorted set.
    async fn zadd(&self, key: &str, member: &str, score: f64) -> StoreResult<()>;

    /// Members between two ranks, highest score first (inclusive bounds).
    async fn zrevrange(&self, key: &str, start: isize, stop: isize) -> StoreResult<Vec<String>>;

    /// Removes members between two ranks, lowest score first (inclusive bounds).
    async fn zremrangebyrank(&self, key: &str, start: isize, stop: isize) -> StoreResult<()>;

    /// Lists keys matching a glob pattern (`*` and `?` wildcards).
    ///
    /// The order of the returned keys is unspecified.
    async fn scan_keys(&self, pattern: &str) -> StoreResult<Vec<String>>;

    /// Round-trips a no-op command to check connectivity.
    async fn ping(&self) -> StoreResult<()>;
}
