#![allow(dead_code)]

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::Request;
use axum::response::Response;
use axum_test::TestServer;
use clicktrail::config::ServiceSettings;
use clicktrail::domain::click_event::ClickEvent;
use clicktrail::domain::repositories::KeyValueStore;
use clicktrail::infrastructure::store::{MemoryStore, UnconfiguredStore};
use clicktrail::routes::{app_router, router};
use clicktrail::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tower::{Layer, ServiceExt};

pub const PEER_ADDR: &str = "127.0.0.1:12345";

/// Injects a fixed peer address, as `into_make_service_with_connect_info` would.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = PEER_ADDR.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

pub fn create_state_with_store(
    store: Arc<dyn KeyValueStore>,
) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(100);
    let state = AppState::new(store, tx, &ServiceSettings::default());

    (state, rx)
}

pub fn create_test_state() -> (AppState, mpsc::Receiver<ClickEvent>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let (state, rx) = create_state_with_store(store.clone());

    (state, rx, store)
}

pub fn create_unconfigured_state() -> (AppState, mpsc::Receiver<ClickEvent>) {
    create_state_with_store(Arc::new(UnconfiguredStore::new("REDIS_URL is not set")))
}

pub fn test_server(state: AppState) -> TestServer {
    let app = router(state).layer(MockConnectInfoLayer);
    TestServer::new(app).unwrap()
}

/// Sends one request through the served app, path normalization included.
pub async fn call_app(state: AppState, request: Request<Body>) -> Response {
    MockConnectInfoLayer
        .layer(app_router(state))
        .oneshot(request)
        .await
        .unwrap()
}

/// Records every queued click, standing in for the background worker.
pub async fn drain_clicks(state: &AppState, rx: &mut mpsc::Receiver<ClickEvent>) -> usize {
    let mut recorded = 0;
    while let Ok(event) = rx.try_recv() {
        state.click_service.record(&event).await;
        recorded += 1;
    }
    recorded
}

/// Extracts the code from a `.../api/{code}` short URL.
pub fn code_of(short_url: &str) -> String {
    short_url.rsplit('/').next().unwrap().to_string()
}

pub async fn shorten(server: &TestServer, url: &str) -> String {
    let response = server
        .post("/api/shorten")
        .add_header("Host", "s.example.com")
        .json(&serde_json::json!({ "url": url }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    code_of(json["short_url"].as_str().unwrap())
}
