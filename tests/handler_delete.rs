mod common;

use serde_json::Value;
use smart_url_shortener::domain::repositories::RecordStore;

#[tokio::test]
async fn test_delete_then_redirect_is_not_found() {
    let (server, store) = common::create_test_server();
    common::seed_record(&store, "gone", "https://example.com/");

    let response = server
        .get("/api/del")
        .add_query_param("url", "http://s.test/gone")
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "deleted");
    assert_eq!(body["short_code"], "gone");

    assert_eq!(server.get("/gone").await.status_code(), 404);
    assert!(store.find("gone").await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_twice() {
    let (server, store) = common::create_test_server();
    common::seed_record(&store, "once", "https://example.com/");

    let first = server.get("/api/del").add_query_param("url", "once").await;
    let second = server.get("/api/del").add_query_param("url", "once").await;

    assert_eq!(first.status_code(), 200);
    assert_eq!(second.status_code(), 404);
}

#[tokio::test]
async fn test_delete_leaves_other_records() {
    let (server, store) = common::create_test_server();
    common::seed_record(&store, "keep", "https://example.com/a");
    common::seed_record(&store, "drop", "https://example.com/b");

    server.get("/api/del").add_query_param("url", "drop").await;

    assert!(store.find("keep").await.unwrap().is_some());
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_delete_missing_url() {
    let (server, _store) = common::create_test_server();

    let response = server.get("/api/del").await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_delete_invalid_code() {
    let (server, _store) = common::create_test_server();

    let response = server
        .get("/api/del")
        .add_query_param("url", "no!pe")
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_code");
}

#[tokio::test]
async fn test_deleted_slug_can_be_reassigned() {
    let (server, _store) = common::create_test_server();

    server
        .get("/api/short")
        .add_query_param("url", "https://example.com/a")
        .add_query_param("slug", "reuse")
        .await;
    server.get("/api/del").add_query_param("url", "reuse").await;

    let response = server
        .get("/api/short")
        .add_query_param("url", "https://example.com/b")
        .add_query_param("slug", "reuse")
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        server.get("/reuse").await.header("location"),
        "https://example.com/b"
    );
}

#[tokio::test]
async fn test_delete_duplicate_query_key_keeps_record() {
    let (server, store) = common::create_test_server();
    common::seed_record(&store, "abc", "https://example.com/");

    let response = server.get("/api/del?url=abc&url=abc").await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_request");
    assert!(store.find("abc").await.unwrap().is_some());
}
