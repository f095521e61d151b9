//! Business logic services for the application layer.

pub mod access_guard;
pub mod click_service;
pub mod dashboard_service;
pub mod link_service;

pub use access_guard::AccessGuard;
pub use click_service::ClickService;
pub use dashboard_service::DashboardService;
pub use link_service::LinkService;
