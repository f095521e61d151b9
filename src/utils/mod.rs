//! Utility functions for code generation and request inspection.
//!
//! - [`code_generator`] - Random short code generation
//! - [`client_ip`] - Client IP extraction from proxy headers
//! - [`extract_host`] - Public host extraction for building short URLs

pub mod client_ip;
pub mod code_generator;
pub mod extract_host;
