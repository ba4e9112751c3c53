// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::Request;
use std::sync::Arc;
use tokio::sync::Mutex;
use workout_tracker::config::Config;
use workout_tracker::db::{MemoryStore, SharedStore};
use workout_tracker::routes::create_router;
use workout_tracker::services::{AnyBackend, ConfiguredPosition, EntityStore, Tracker};
use workout_tracker::AppState;

/// Build app state over the given store with local product storage.
#[allow(dead_code)]
pub fn test_state(store: SharedStore) -> Arc<AppState> {
    let config = Config::default();
    let tracker = Tracker::load(
        store.clone(),
        config.map_zoom,
        &ConfiguredPosition::new(config.home),
    )
    .expect("tracker should load from test store");
    let products = EntityStore::new(AnyBackend::from_config(store, None));

    Arc::new(AppState {
        config,
        tracker: Mutex::new(tracker),
        products,
    })
}

/// Create a test app backed by an empty in-memory store.
/// Returns the router, the shared state and the store.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = test_state(store.clone());
    (create_router(state.clone()), state, store)
}

/// JSON request helper.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Bodyless request helper.
#[allow(dead_code)]
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
