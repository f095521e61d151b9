//! Application layer services implementing business logic.
//!
//! Services hold a shared [`KeyValueStore`](crate::domain::repositories::KeyValueStore)
//! handle and expose the operations HTTP handlers and the click worker call.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation and resolution
//! - [`services::click_service::ClickService`] - Click counters and the recent-click log
//! - [`services::dashboard_service::DashboardService`] - Dashboard aggregates
//! - [`services::access_guard::AccessGuard`] - Bot filtering and per-IP rate limiting

pub mod services;
