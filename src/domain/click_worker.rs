//! Background worker draining the click queue.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::application::services::ClickService;
use crate::domain::click_event::ClickEvent;

/// Records every queued click until all senders are dropped.
///
/// Individual store failures are logged inside [`ClickService::record`] and
/// never stop the worker.
pub async fn run_click_worker(mut rx: mpsc::Receiver<ClickEvent>, click_service: Arc<ClickService>) {
    while let Some(event) = rx.recv().await {
        debug!("Recording click for {}", event.code);
        click_service.record(&event).await;
    }

    info!("Click queue closed, worker stopping");
}
