//! End-to-end checks of the reqwest transport against a mock server

use apifetch::{Envelope, FetchConfig, Fetcher, Query, RequestProps, Service};
use mockito::{Matcher, Server};
use serde_json::json;
use std::time::Duration;

/// Point both services at the mock server; proxy with a trailing slash.
fn config_for(base_url: &str) -> FetchConfig {
    let mut config = FetchConfig::default();
    config.hosts.proxy = format!("{}/", base_url);
    config.hosts.node = base_url.to_string();
    config
}

#[tokio::test]
async fn test_get_through_proxy_returns_json() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1.0/items")
        .match_header("content-type", "application/json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("sort".into(), "name".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"x":1}"#)
        .create_async()
        .await;

    let fetcher = Fetcher::new(config_for(&server.url())).unwrap();
    let props = RequestProps::for_route("/items")
        .with_query(Query::new().with("page", 2).with("sort", "name"));

    let envelope = fetcher.get(props).await;

    mock.assert_async().await;
    assert_eq!(envelope, Envelope::success(json!({"x": 1})));
}

#[tokio::test]
async fn test_post_to_node_sends_json_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/sessions")
        .match_body(Matcher::Json(json!({"user": "ada", "remember": true})))
        .with_status(201)
        .with_body(r#"{"id":"s-1"}"#)
        .create_async()
        .await;

    let fetcher = Fetcher::new(config_for(&server.url())).unwrap();
    let props = RequestProps::for_route("/sessions")
        .with_service(Service::Node)
        .with_body(json!({"user": "ada", "remember": true}));

    let envelope = fetcher.post(props).await;

    mock.assert_async().await;
    assert_eq!(envelope.data, Some(json!({"id": "s-1"})));
}

#[tokio::test]
async fn test_text_returns_plain_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v3/version")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("1.4.2")
        .create_async()
        .await;

    let fetcher = Fetcher::new(config_for(&server.url())).unwrap();
    let envelope = fetcher
        .text(RequestProps::for_route("/version").with_api_version("v3"))
        .await;

    mock.assert_async().await;
    assert_eq!(envelope, Envelope::success("1.4.2".to_string()));
}

#[tokio::test]
async fn test_error_status_yields_server_error_field() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1.0/broken")
        .with_status(400)
        .with_body(r#"{"error":"bad"}"#)
        .create_async()
        .await;

    let fetcher = Fetcher::new(config_for(&server.url())).unwrap();
    let envelope = fetcher.get(RequestProps::for_route("/broken")).await;

    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({"data": null, "error": "bad", "code": "internal_error"})
    );
}

#[tokio::test]
async fn test_error_status_without_error_field_stays_failed() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1.0/gone")
        .with_status(410)
        .with_body(r#"{"detail":"removed"}"#)
        .create_async()
        .await;

    let fetcher = Fetcher::new(config_for(&server.url())).unwrap();
    let envelope = fetcher.get(RequestProps::for_route("/gone")).await;

    let rendered = serde_json::to_string(&envelope).unwrap();
    let parsed: Envelope = serde_json::from_str(&rendered).unwrap();

    assert!(!envelope.is_success());
    assert!(!parsed.is_success());
    assert_eq!(parsed, envelope);
}

#[tokio::test]
async fn test_connection_failure_is_reported_in_envelope() {
    let mut config = FetchConfig::default();
    config.hosts.node = "http://127.0.0.1:1".to_string();

    let fetcher = Fetcher::new(config).unwrap();
    let envelope = fetcher
        .get(RequestProps::for_route("/x").with_service(Service::Node))
        .await;

    assert!(envelope.data.is_none());
    assert_eq!(envelope.code.as_deref(), Some("internal_error"));
    let message = envelope.error.unwrap();
    assert!(message.as_str().unwrap().starts_with("Network error"));
}

#[tokio::test]
async fn test_local_response_beats_tight_timeout() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/ping")
        .with_status(200)
        .with_body("true")
        .create_async()
        .await;

    let fetcher = Fetcher::new(config_for(&server.url()))
        .unwrap()
        .with_timeout(Duration::from_millis(500));
    let envelope = fetcher
        .get(RequestProps::for_route("/ping").with_service(Service::Node))
        .await;

    assert_eq!(envelope, Envelope::success(json!(true)));
}
