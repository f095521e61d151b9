//! Shared application state.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{AccessGuard, ClickService, DashboardService, LinkService};
use crate::config::ServiceSettings;
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::KeyValueStore;

/// State cloned into every handler.
///
/// All services share one store handle created at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KeyValueStore>,
    pub link_service: Arc<LinkService>,
    pub click_service: Arc<ClickService>,
    pub dashboard_service: Arc<DashboardService>,
    pub access_guard: Arc<AccessGuard>,
    pub click_tx: mpsc::Sender<ClickEvent>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        click_tx: mpsc::Sender<ClickEvent>,
        settings: &ServiceSettings,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(store.clone(), settings.code_length)),
            click_service: Arc::new(ClickService::new(
                store.clone(),
                settings.click_log_capacity,
                settings.unique_visitor_ttl,
            )),
            dashboard_service: Arc::new(DashboardService::new(
                store.clone(),
                settings.dashboard_url_limit,
                settings.dashboard_click_limit,
            )),
            access_guard: Arc::new(AccessGuard::new(
                store.clone(),
                settings.rate_limit_max_requests,
                settings.rate_limit_window,
            )),
            store,
            click_tx,
        }
    }
}
