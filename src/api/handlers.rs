//! API Handlers
//!
//! HTTP request handlers for each post endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::cache::CachingProxy;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::events::PostEvent;
use crate::models::{
    CreatePostRequest, DeleteResponse, HealthResponse, ListPostsQuery, Post, SearchQuery,
    SearchResponse, StatsResponse, UpdatePostRequest,
};
use crate::search::SearchGateway;
use crate::store::{MemoryPostStore, PostStore};
use crate::tasks::EventNotifier;

/// Store handle shared by the cache and the search gateway.
pub type SharedStore = Arc<dyn PostStore>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cached view of the post store
    pub posts: Arc<CachingProxy<SharedStore>>,
    /// Breaker-guarded search over the raw store
    pub search: Arc<SearchGateway<SharedStore>>,
    /// Publishing handle for post events
    pub notifier: EventNotifier,
}

impl AppState {
    /// Wires the cache and search gateway around `store`.
    pub fn new(store: SharedStore, config: &Config, notifier: EventNotifier) -> Self {
        let posts = CachingProxy::new(store.clone(), config.cache_max_entries, config.cache_ttl());
        let search = SearchGateway::new(store, config.breaker_config(), config.search_scan_limit);
        Self {
            posts: Arc::new(posts),
            search: Arc::new(search),
            notifier,
        }
    }

    /// Creates a new AppState over an empty in-memory store.
    pub fn from_config(config: &Config, notifier: EventNotifier) -> Self {
        Self::new(Arc::new(MemoryPostStore::new()), config, notifier)
    }
}

/// Handler for POST /api/v1/posts
pub async fn create_post_handler(
    State(state): State<AppState>,
    Json(req): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>)> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let post = state.posts.create(req.into_new_post())?;
    info!(post_id = post.id, "Post created");
    state.notifier.notify(PostEvent::created(post.clone())).await;

    Ok((StatusCode::CREATED, Json(post)))
}

/// Handler for GET /api/v1/posts/:id
pub async fn get_post_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Post>> {
    state
        .posts
        .find_by_id(id)?
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

/// Handler for GET /api/v1/posts
pub async fn list_posts_handler(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<Vec<Post>>> {
    let posts = state.posts.find_all(&query.into_filter())?;
    Ok(Json(posts))
}

/// Handler for PUT /api/v1/posts/:id
pub async fn update_post_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<Json<Post>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let mut post = state.posts.find_by_id(id)?.ok_or(ApiError::NotFound(id))?;
    req.apply_to(&mut post);

    let stored = state.posts.update(&post)?;
    info!(post_id = id, "Post updated");
    state.notifier.notify(PostEvent::updated(stored.clone())).await;

    Ok(Json(stored))
}

/// Handler for DELETE /api/v1/posts/:id
pub async fn delete_post_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>> {
    if state.posts.find_by_id(id)?.is_none() {
        return Err(ApiError::NotFound(id));
    }

    state.posts.delete(id)?;
    info!(post_id = id, "Post deleted");
    state.notifier.notify(PostEvent::deleted(id)).await;

    Ok(Json(DeleteResponse::new(id)))
}

/// Handler for GET /api/v1/posts/search
///
/// An open circuit still answers 200 with no results; other failures map to 503.
pub async fn search_posts_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>> {
    if query.q.trim().is_empty() {
        return Err(ApiError::InvalidRequest(
            "Search query is required".to_string(),
        ));
    }

    match state.search.search(&query.q) {
        Ok(outcome) => Ok(Json(SearchResponse::new(query.q, outcome))),
        Err(_) => Err(ApiError::SearchUnavailable {
            circuit_breaker: state.search.breaker_state().to_string(),
        }),
    }
}

/// Handler for GET /api/v1/cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(state.posts.statistics()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
