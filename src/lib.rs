//! # clicktrail
//!
//! A Redis-backed URL shortener with click analytics, built with Axum.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, store key layout and the store trait
//! - **Application Layer** ([`application`]) - Shortening, click accounting,
//!   dashboard aggregation and the access guard
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis, in-memory and
//!   unconfigured store backends
//! - **API Layer** ([`api`]) - REST handlers, DTOs, extractors and middleware
//!
//! ## Features
//!
//! - Random alphanumeric codes allocated with atomic set-if-absent
//! - 302 redirects with asynchronous click tracking
//! - Per-code, total and daily counters, unique visitors and a capped click log
//! - Bot filtering and per-IP rate limiting on shorten and dashboard
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379"
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        AccessGuard, ClickService, DashboardService, LinkService,
    };
    pub use crate::domain::click_event::ClickEvent;
    pub use crate::domain::entities::{ClickRecord, Dashboard, DashboardStats, UrlLog};
    pub use crate::domain::repositories::KeyValueStore;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
