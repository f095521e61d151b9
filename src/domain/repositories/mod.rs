//! Storage trait definitions for the domain layer.
//!
//! Services never talk to Redis directly: they depend on the
//! [`KeyValueStore`] contract, implemented in `crate::infrastructure::store`.
//! Mock implementations are auto-generated via `mockall` for unit tests.

pub mod key_value_store;

pub use key_value_store::{KeyValueStore, StoreError, StoreResult};

#[cfg(test)]
pub use key_value_store::MockKeyValueStore;
