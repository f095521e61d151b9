//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`ClickRecord`] - A click as persisted in the recent-click log
//! - [`DashboardStats`] - Aggregate counters
//! - [`UrlLog`] - Per-link summary shown on the dashboard
//! - [`Dashboard`] - Everything the dashboard endpoint returns

pub mod click_record;
pub mod dashboard;
pub mod shortened_link;

pub use click_record::ClickRecord;
pub use dashboard::{Dashboard, DashboardStats, UrlLog};
pub use shortened_link::ShortenedLink;
