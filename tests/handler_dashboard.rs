mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_dashboard_empty() {
    let (state, _rx, _store) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.get("/api/dashboard").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["stats"]["total_urls"], 0);
    assert_eq!(json["stats"]["total_clicks"], 0);
    assert_eq!(json["stats"]["today_clicks"], 0);
    assert_eq!(json["stats"]["unique_visitors"], 0);
    assert_eq!(json["url_logs"].as_array().unwrap().len(), 0);
    assert_eq!(json["click_logs"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_dashboard_counts_clicks_per_code() {
    let (state, mut rx, _store) = common::create_test_state();
    let server = common::test_server(state.clone());

    let first = common::shorten(&server, "https://example.com/first").await;
    let second = common::shorten(&server, "https://example.com/second").await;

    for _ in 0..3 {
        server
            .get(&format!("/api/{first}"))
            .add_header("User-Agent", "Mozilla/5.0")
            .await;
    }
    for _ in 0..2 {
        server
            .get(&format!("/api/{second}"))
            .add_header("X-Real-IP", "192.0.2.50")
            .await;
    }

    assert_eq!(common::drain_clicks(&state, &mut rx).await, 5);

    let response = server.get("/api/dashboard").await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["stats"]["total_urls"], 2);
    assert_eq!(json["stats"]["total_clicks"], 5);
    assert_eq!(json["stats"]["today_clicks"], 5);
    assert_eq!(json["stats"]["unique_visitors"], 2);

    let url_logs = json["url_logs"].as_array().unwrap();
    let clicks_for = |code: &str| {
        url_logs
            .iter()
            .find(|log| log["code"] == code)
            .map(|log| log["clicks"].as_i64().unwrap())
    };
    assert_eq!(clicks_for(&first), Some(3));
    assert_eq!(clicks_for(&second), Some(2));

    let click_logs = json["click_logs"].as_array().unwrap();
    assert_eq!(click_logs.len(), 5);
    assert!(click_logs.iter().any(|c| c["ip"] == "192.0.2.50"));
    assert!(click_logs.iter().any(|c| c["user_agent"] == "Mozilla/5.0"));
}

#[tokio::test]
async fn test_dashboard_link_fields() {
    let (state, _rx, _store) = common::create_test_state();
    let server = common::test_server(state);

    let code = common::shorten(&server, "https://example.com/page").await;

    let json = server.get("/api/dashboard").await.json::<serde_json::Value>();
    let log = &json["url_logs"][0];

    assert_eq!(log["code"], code.as_str());
    assert_eq!(log["long_url"], "https://example.com/page");
    assert_eq!(log["clicks"], 0);
    assert!(log["created_at"].is_string());
    assert_eq!(log["last_click"], "0001-01-01T00:00:00Z");
}

#[tokio::test]
async fn test_dashboard_wrong_method() {
    let (state, _rx, _store) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.delete("/api/dashboard").await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_dashboard_without_store_is_configuration_error() {
    let (state, _rx) = common::create_unconfigured_state();
    let server = common::test_server(state);

    let response = server.get("/api/dashboard").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "configuration_error");
}
