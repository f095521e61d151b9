//! HTTP middleware for request processing and protection.

pub mod access_guard;
pub mod tracing;
