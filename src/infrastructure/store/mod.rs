//! Key-value store backends.
//!
//! - [`RedisStore`] - Production Redis backend behind a shared `ConnectionManager`
//! - [`MemoryStore`] - In-process backend with TTL support, used by tests
//! - [`UnconfiguredStore`] - Fails every call; used when Redis is unavailable

mod memory_store;
mod redis_store;
mod unconfigured_store;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;
pub use unconfigured_store::UnconfiguredStore;
