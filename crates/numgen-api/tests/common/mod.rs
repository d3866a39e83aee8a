//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use numgen_core::clock::Clock;
use numgen_core::rng::RandomSource;
use numgen_core::store::{HistoryStore, StoredEntry};
use numgen_generator::application::command_handlers;
use numgen_generator::domain::reveal::RevealPlan;
use numgen_test_support::{FixedClock, InMemoryHistoryStore, MockRng};
use tower::ServiceExt;

use numgen_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock + Send + Sync> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// A running app plus handles on its shared state and store.
pub struct TestApp {
    pub state: AppState,
    pub store: Arc<InMemoryHistoryStore>,
}

impl TestApp {
    /// A fresh router over the shared state, as `main.rs` builds it.
    pub fn router(&self) -> Router {
        numgen_api::build_router(self.state.clone())
    }
}

/// Build the app with an empty history, an RNG that always draws the
/// minimum, and no reveal delay.
pub async fn build_test_app() -> TestApp {
    build_test_app_with(Vec::new(), MockRng, RevealPlan::instant()).await
}

/// Build the app over a pre-populated store, restored the way `main.rs`
/// restores it.
pub async fn build_test_app_with(
    persisted: Vec<StoredEntry>,
    rng: impl RandomSource + Send + 'static,
    reveal: RevealPlan,
) -> TestApp {
    let store = Arc::new(InMemoryHistoryStore::new(persisted));
    let generator = command_handlers::restore_state(store.as_ref()).await;
    let rng: Arc<Mutex<dyn RandomSource + Send>> = Arc::new(Mutex::new(rng));
    let history_store: Arc<dyn HistoryStore> = Arc::clone(&store) as Arc<dyn HistoryStore>;
    let state = AppState::new(fixed_clock(), rng, history_store, generator, reveal);

    TestApp { state, store }
}

/// Build app state over any store, restored the way `main.rs` restores it.
pub async fn app_state_over(
    store: Arc<dyn HistoryStore>,
    rng: impl RandomSource + Send + 'static,
) -> AppState {
    let generator = command_handlers::restore_state(store.as_ref()).await;
    let rng: Arc<Mutex<dyn RandomSource + Send>> = Arc::new(Mutex::new(rng));
    AppState::new(fixed_clock(), rng, store, generator, RevealPlan::instant())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, headers, body_bytes.to_vec())
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let (status, _, body_bytes) = send(app, request).await;
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let (status, _, body_bytes) = send(app, request).await;
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a DELETE request and return the response.
pub async fn delete_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let (status, _, body_bytes) = send(app, request).await;
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the raw response.
pub async fn get_raw(app: Router, uri: &str) -> (StatusCode, HeaderMap, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let (status, headers, body_bytes) = send(app, request).await;

    (status, headers, String::from_utf8(body_bytes).unwrap())
}
