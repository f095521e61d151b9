mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_shorten_returns_short_url() {
    let (state, _rx, _store) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/api/shorten")
        .add_header("Host", "s.example.com")
        .json(&json!({ "url": "https://example.com/page" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let short_url = json["short_url"].as_str().unwrap();
    let code = short_url.strip_prefix("https://s.example.com/api/").unwrap();

    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[tokio::test]
async fn test_shorten_localhost_uses_http() {
    let (state, _rx, _store) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/api/shorten")
        .add_header("Host", "localhost:3000")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert!(
        json["short_url"]
            .as_str()
            .unwrap()
            .starts_with("http://localhost:3000/api/")
    );
}

#[tokio::test]
async fn test_shorten_stores_url_verbatim() {
    let (state, _rx, _store) = common::create_test_state();
    let server = common::test_server(state);

    let code = common::shorten(&server, "not a url at all").await;

    let response = server.get(&format!("/api/{code}")).await;

    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "not a url at all");
}

#[tokio::test]
async fn test_shorten_empty_url() {
    let (state, _rx, _store) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/api/shorten")
        .add_header("Host", "s.example.com")
        .json(&json!({ "url": "" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_request");
}

#[tokio::test]
async fn test_shorten_missing_url_field() {
    let (state, _rx, _store) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/api/shorten")
        .add_header("Host", "s.example.com")
        .json(&json!({ "link": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_shorten_malformed_json() {
    let (state, _rx, _store) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/api/shorten")
        .add_header("Host", "s.example.com")
        .text("{\"url\": ")
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_request");
}

#[tokio::test]
async fn test_shorten_accepts_json_without_content_type() {
    let (state, _rx, _store) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/api/shorten")
        .add_header("Host", "s.example.com")
        .text(r#"{"url":"https://example.com/page"}"#)
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert!(
        json["short_url"]
            .as_str()
            .unwrap()
            .starts_with("https://s.example.com/api/")
    );
}

#[tokio::test]
async fn test_shorten_empty_body() {
    let (state, _rx, _store) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/api/shorten")
        .add_header("Host", "s.example.com")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_request");
}

#[tokio::test]
async fn test_shorten_wrong_method() {
    let (state, _rx, _store) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.get("/api/shorten").await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "method_not_allowed");
}

#[tokio::test]
async fn test_shorten_without_store_is_configuration_error() {
    let (state, _rx) = common::create_unconfigured_state();
    let server = common::test_server(state);

    let response = server
        .post("/api/shorten")
        .add_header("Host", "s.example.com")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "configuration_error");
}
