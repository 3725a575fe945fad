mod common;

use serde_json::Value;
use smart_url_shortener::domain::repositories::RecordStore;

#[tokio::test]
async fn test_shorten_derives_hash_code() {
    let (server, store) = common::create_test_server();

    let response = server
        .get("/api/short")
        .add_query_param("url", "https://example.com/page")
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["short_code"], "FB37C0");
    assert_eq!(body["original_url"], "https://example.com/page");
    assert_eq!(body["short_url"], "http://s.test/FB37C0");

    let record = store.find("FB37C0").await.unwrap().unwrap();
    assert_eq!(record.clicks, 0);
}

#[tokio::test]
async fn test_shorten_same_url_twice_returns_same_code() {
    let (server, store) = common::create_test_server();

    let first: Value = server
        .get("/api/short")
        .add_query_param("url", "https://example.com/page")
        .await
        .json();
    let second: Value = server
        .get("/api/short")
        .add_query_param("url", "https://example.com/page")
        .await
        .json();

    assert_eq!(first["short_code"], second["short_code"]);
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_shorten_adds_default_scheme() {
    let (server, _store) = common::create_test_server();

    let response = server
        .get("/api/short")
        .add_query_param("url", "example.com")
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["original_url"], "https://example.com/");
    assert_eq!(body["short_code"], "182CCE");
}

#[tokio::test]
async fn test_shorten_with_slug() {
    let (server, store) = common::create_test_server();

    let response = server
        .get("/api/short")
        .add_query_param("url", "https://rust-lang.org/")
        .add_query_param("slug", "rusty")
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["short_code"], "rusty");
    assert_eq!(body["short_url"], "http://s.test/rusty");
    assert!(store.find("1D33EA").await.unwrap().is_none());
}

#[tokio::test]
async fn test_shorten_slug_conflict() {
    let (server, store) = common::create_test_server();
    common::seed_record(&store, "promo", "https://example.com/a");

    let response = server
        .get("/api/short")
        .add_query_param("url", "https://example.com/b")
        .add_query_param("slug", "promo")
        .await;

    assert_eq!(response.status_code(), 409);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "slug_conflict");
    assert_eq!(body["error"]["details"]["slug"], "promo");
}

#[tokio::test]
async fn test_shorten_hash_collision() {
    let (server, store) = common::create_test_server();
    common::seed_record(&store, "FB37C0", "https://squatter.example/");

    let response = server
        .get("/api/short")
        .add_query_param("url", "https://example.com/page")
        .await;

    assert_eq!(response.status_code(), 409);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "hash_collision");
    assert_eq!(
        store.find("FB37C0").await.unwrap().unwrap().long_url,
        "https://squatter.example/"
    );
}

#[tokio::test]
async fn test_shorten_missing_url() {
    let (server, _store) = common::create_test_server();

    let response = server.get("/api/short").await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_url");
}

#[tokio::test]
async fn test_shorten_rejects_unsupported_scheme() {
    let (server, store) = common::create_test_server();

    let response = server
        .get("/api/short")
        .add_query_param("url", "ftp://example.com/file")
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_shorten_invalid_slug_checked_before_url() {
    let (server, _store) = common::create_test_server();

    let response = server
        .get("/api/short")
        .add_query_param("url", "ftp://example.com/file")
        .add_query_param("slug", "a b")
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_slug");
}

#[tokio::test]
async fn test_shorten_duplicate_query_key_is_structured_error() {
    let (server, store) = common::create_test_server();

    let response = server.get("/api/short?url=a.com&url=b.com").await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_request");
    assert!(body["error"]["details"]["reason"].is_string());
    assert_eq!(store.count().await.unwrap(), 0);
}
