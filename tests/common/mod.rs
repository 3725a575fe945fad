#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{DateTime, Utc};
use smart_url_shortener::domain::entities::UrlRecord;
use smart_url_shortener::domain::retention_sweeper::{
    DEFAULT_SWEEP_INTERVAL, RetentionSweeper, SweeperHandle, SweeperStatus,
};
use smart_url_shortener::infrastructure::persistence::MemoryRecordStore;
use smart_url_shortener::routes::router;
use smart_url_shortener::state::AppState;
use std::sync::Arc;

pub const BASE_URL: &str = "http://s.test";

/// State over a fresh in-memory store with an idle sweeper status.
pub fn create_test_state() -> (AppState, Arc<MemoryRecordStore>) {
    let store = Arc::new(MemoryRecordStore::new());
    let state = AppState::new(
        store.clone(),
        BASE_URL,
        Arc::new(SweeperStatus::default()),
    );
    (state, store)
}

/// Test server over the full router and a fresh in-memory store.
pub fn create_test_server() -> (TestServer, Arc<MemoryRecordStore>) {
    let (state, store) = create_test_state();
    let server = TestServer::new(router(state)).unwrap();
    (server, store)
}

/// Test server whose retention sweeper is actually running.
pub async fn create_server_with_sweeper() -> (TestServer, Arc<MemoryRecordStore>, SweeperHandle) {
    let store = Arc::new(MemoryRecordStore::new());
    let sweeper = RetentionSweeper::new(store.clone(), DEFAULT_SWEEP_INTERVAL).spawn();

    let status = sweeper.status();
    while !status.is_running() {
        tokio::task::yield_now().await;
    }

    let state = AppState::new(store.clone(), BASE_URL, status);
    let server = TestServer::new(router(state)).unwrap();
    (server, store, sweeper)
}

pub fn seed_record(store: &MemoryRecordStore, code: &str, url: &str) {
    store.seed(UrlRecord::new(code.to_string(), url.to_string(), Utc::now()));
}

pub fn seed_record_at(store: &MemoryRecordStore, code: &str, url: &str, created_at: DateTime<Utc>) {
    store.seed(UrlRecord::new(code.to_string(), url.to_string(), created_at));
}
