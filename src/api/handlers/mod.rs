//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod dashboard;
pub mod fallback;
pub mod health;
pub mod redirect;
pub mod shorten;

pub use dashboard::dashboard_handler;
pub use fallback::{method_not_allowed_handler, not_found_handler};
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
