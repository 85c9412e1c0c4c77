//! Resilience Tests
//!
//! Drives the router over a store that can be made to fail, checking that the
//! cache keeps serving reads and that search degrades behind the breaker.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use parking_lot::Mutex;
use post_gateway::{
    api::create_router,
    error::StoreError,
    events::{EventKind, Observer, ObserverError, PostEvent},
    models::{NewPost, Post, PostFilter},
    spawn_notifier,
    store::{MemoryPostStore, PostStore, StoreResult},
    AppState, Config,
};
use serde_json::Value;
use tower::ServiceExt;

// == Test Doubles ==

/// In-memory store with switchable read and scan failures.
#[derive(Default)]
struct UnreliableStore {
    inner: MemoryPostStore,
    fail_reads: AtomicBool,
    fail_scans: AtomicBool,
}

impl PostStore for UnreliableStore {
    fn create(&self, post: NewPost) -> StoreResult<Post> {
        self.inner.create(post)
    }

    fn find_by_id(&self, id: i64) -> StoreResult<Option<Post>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("database offline".to_string()));
        }
        self.inner.find_by_id(id)
    }

    fn find_all(&self, filter: &PostFilter) -> StoreResult<Vec<Post>> {
        if self.fail_scans.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("database offline".to_string()));
        }
        self.inner.find_all(filter)
    }

    fn update(&self, post: &Post) -> StoreResult<Post> {
        self.inner.update(post)
    }

    fn delete(&self, id: i64) -> StoreResult<()> {
        self.inner.delete(id)
    }
}

#[derive(Default)]
struct RecordingObserver {
    seen: Mutex<Vec<(EventKind, i64)>>,
}

impl Observer for RecordingObserver {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn on_event(&self, event: &PostEvent) -> Result<(), ObserverError> {
        self.seen.lock().push((event.kind, event.post_id));
        Ok(())
    }
}

// == Helper Functions ==

fn create_app(store: Arc<UnreliableStore>, config: &Config) -> Router {
    let (notifier, _handle) = spawn_notifier(Vec::new(), 16);
    create_router(AppState::new(store, config, notifier))
}

fn breaker_config(max_failures: u32, reset_timeout: u64) -> Config {
    Config {
        breaker_max_failures: max_failures,
        breaker_reset_timeout: reset_timeout,
        ..Config::default()
    }
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn create_post(app: &Router, title: &str) -> i64 {
    let body = format!(
        r#"{{"title":"{}","content":"body","type":"review","author_id":2}}"#,
        title
    );
    let (status, json) = send(app, "POST", "/api/v1/posts", Some(&body)).await;
    assert_eq!(status, StatusCode::CREATED);
    json["id"].as_i64().unwrap()
}

// == Cache Resilience ==

#[tokio::test]
async fn test_cached_post_survives_store_outage() {
    let store = Arc::new(UnreliableStore::default());
    let app = create_app(store.clone(), &Config::default());
    let id = create_post(&app, "warm").await;

    store.fail_reads.store(true, Ordering::SeqCst);

    let (status, json) = send(&app, "GET", &format!("/api/v1/posts/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "warm");
}

#[tokio::test]
async fn test_uncached_read_during_outage_is_unavailable() {
    let store = Arc::new(UnreliableStore::default());
    let app = create_app(store.clone(), &Config::default());
    store.fail_reads.store(true, Ordering::SeqCst);

    let (status, json) = send(&app, "GET", "/api/v1/posts/3", None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(json.get("error").is_some());

    let (_, stats) = send(&app, "GET", "/api/v1/cache/stats", None).await;
    assert_eq!(stats["cache_statistics"]["misses"], 1);
    assert_eq!(stats["cache_statistics"]["current_size"], 0);
}

// == Search Breaker ==

#[tokio::test]
async fn test_search_degrades_once_circuit_opens() {
    let store = Arc::new(UnreliableStore::default());
    let app = create_app(store.clone(), &breaker_config(2, 30));
    create_post(&app, "rust breakers").await;
    store.fail_scans.store(true, Ordering::SeqCst);

    let (status, json) = send(&app, "GET", "/api/v1/posts/search?q=rust", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["circuit_breaker"], "closed");

    let (status, json) = send(&app, "GET", "/api/v1/posts/search?q=rust", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["circuit_breaker"], "open");

    // Store recovers, but the open circuit keeps short-circuiting
    store.fail_scans.store(false, Ordering::SeqCst);
    let (status, json) = send(&app, "GET", "/api/v1/posts/search?q=rust", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 0);
    assert_eq!(json["degraded"], true);
    assert_eq!(json["circuit_breaker"], "open");
}

#[tokio::test]
async fn test_search_recovers_after_reset_timeout() {
    let store = Arc::new(UnreliableStore::default());
    let app = create_app(store.clone(), &breaker_config(1, 1));
    create_post(&app, "rust recovery").await;

    store.fail_scans.store(true, Ordering::SeqCst);
    let (status, _) = send(&app, "GET", "/api/v1/posts/search?q=rust", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    store.fail_scans.store(false, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(1100)).await;

    let (status, json) = send(&app, "GET", "/api/v1/posts/search?q=rust", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);
    assert_eq!(json["degraded"], false);
    assert_eq!(json["circuit_breaker"], "closed");
}

#[tokio::test]
async fn test_failed_probe_reopens_circuit() {
    let store = Arc::new(UnreliableStore::default());
    let app = create_app(store.clone(), &breaker_config(1, 1));
    store.fail_scans.store(true, Ordering::SeqCst);

    send(&app, "GET", "/api/v1/posts/search?q=x", None).await;
    tokio::time::sleep(Duration::from_millis(1100)).await;

    let (status, json) = send(&app, "GET", "/api/v1/posts/search?q=x", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["circuit_breaker"], "open");
}

#[tokio::test]
async fn test_open_search_circuit_leaves_crud_untouched() {
    let store = Arc::new(UnreliableStore::default());
    let app = create_app(store.clone(), &breaker_config(1, 30));
    store.fail_scans.store(true, Ordering::SeqCst);
    send(&app, "GET", "/api/v1/posts/search?q=x", None).await;

    let id = create_post(&app, "still writable").await;
    let (status, _) = send(&app, "GET", &format!("/api/v1/posts/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
}

// == Event Delivery ==

#[tokio::test]
async fn test_writes_reach_observers() {
    let recorder = Arc::new(RecordingObserver::default());
    let observers: Vec<Arc<dyn Observer>> = vec![recorder.clone()];
    let (notifier, handle) = spawn_notifier(observers, 4);
    let app = create_router(AppState::from_config(&Config::default(), notifier));

    let id = create_post(&app, "observed").await;
    send(
        &app,
        "PUT",
        &format!("/api/v1/posts/{}", id),
        Some(r#"{"status":"published"}"#),
    )
    .await;
    send(&app, "DELETE", &format!("/api/v1/posts/{}", id), None).await;
    send(&app, "DELETE", &format!("/api/v1/posts/{}", id), None).await;

    drop(app);
    let delivered = handle.await.unwrap();

    assert_eq!(delivered, 3);
    assert_eq!(
        *recorder.seen.lock(),
        vec![
            (EventKind::PostCreated, id),
            (EventKind::PostUpdated, id),
            (EventKind::PostDeleted, id),
        ]
    );
}
