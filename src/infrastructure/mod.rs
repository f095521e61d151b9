//! Infrastructure layer for external integrations.
//!
//! Implements the [`crate::domain::repositories::KeyValueStore`] contract.
//!
//! # Modules
//!
//! - [`store`] - Redis, in-memory and unconfigured store backends

pub mod store;
