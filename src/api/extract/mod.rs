//! Request extractors shared by handlers and middleware.

pub mod client_context;

pub use client_context::ClientContext;
