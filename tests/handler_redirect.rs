mod common;

use serde_json::Value;
use smart_url_shortener::domain::repositories::RecordStore;

#[tokio::test]
async fn test_redirect_success() {
    let (server, store) = common::create_test_server();
    common::seed_record(&store, "redirect1", "https://example.com/target");

    let response = server.get("/redirect1").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "https://example.com/target");

    let record = store.find("redirect1").await.unwrap().unwrap();
    assert_eq!(record.clicks, 1);
    assert!(record.last_clicked.is_some());
}

#[tokio::test]
async fn test_redirect_counts_each_request() {
    let (server, store) = common::create_test_server();
    common::seed_record(&store, "counted", "https://example.com/");

    for _ in 0..5 {
        server.get("/counted").await;
    }

    assert_eq!(store.find("counted").await.unwrap().unwrap().clicks, 5);
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (server, _store) = common::create_test_server();

    let response = server.get("/nonexistent").await;

    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(body["error"]["message"], "Short URL not found");
}

#[tokio::test]
async fn test_redirect_malformed_code_is_not_found() {
    let (server, _store) = common::create_test_server();

    let response = server.get("/bad.code").await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_shorten_then_redirect() {
    let (server, _store) = common::create_test_server();

    let body: Value = server
        .get("/api/short")
        .add_query_param("url", "https://example.com/other")
        .await
        .json();
    assert_eq!(body["short_code"], "42DDA2");

    let response = server.get("/42DDA2").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "https://example.com/other");
}

#[tokio::test]
async fn test_redirect_undecodable_code_is_not_found() {
    let (server, _store) = common::create_test_server();

    let response = server.get("/%FF").await;

    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "not_found");
}
