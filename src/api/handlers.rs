//! API Handlers
//!
//! HTTP request handlers for the collection endpoints. Reads are cache-aside;
//! mutations write through to the store, then refresh the cache.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::Uri,
    Json,
};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::{CacheKey, ResponseCache};
use crate::config::{Config, ConsistencyPolicy};
use crate::error::{AppError, Result};
use crate::models::{
    CreateResponse, DeleteResponse, HealthResponse, RefreshResponse, StatsResponse,
    UpdateResponse,
};
use crate::store::{
    merge, parse_id, position_of, to_compact, Document, DocumentStore, JsonFileStore,
};

/// Path of the collection resource; mutations under the path-prefix policy
/// drop every cache entry whose key starts with it.
pub const COLLECTION_PATH: &str = "/api/data";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe response cache
    pub cache: Arc<RwLock<ResponseCache>>,
    /// Persisted collection
    pub store: Arc<dyn DocumentStore>,
    /// Orders store access against the cache: mutations hold it exclusively
    /// across read, write and cache refresh; cache fills from the store hold
    /// it shared across read and set
    pub store_lock: Arc<RwLock<()>>,
    /// TTL in seconds for every response the handlers cache
    pub response_ttl: u64,
    /// Coherence behaviour on mutation
    pub consistency: ConsistencyPolicy,
}

impl AppState {
    /// Creates a new AppState with default TTL and consistency settings.
    pub fn new(cache: ResponseCache, store: Arc<dyn DocumentStore>) -> Self {
        let defaults = Config::default();
        Self {
            cache: Arc::new(RwLock::new(cache)),
            store,
            store_lock: Arc::new(RwLock::new(())),
            response_ttl: defaults.response_ttl,
            consistency: defaults.consistency,
        }
    }

    /// Creates a new AppState from configuration, backed by the data file.
    pub fn from_config(config: &Config) -> Self {
        let cache = ResponseCache::new(config.default_ttl);
        let store = Arc::new(JsonFileStore::new(config.data_file.clone()));
        Self::new(cache, store)
            .with_response_ttl(config.response_ttl)
            .with_consistency(config.consistency)
    }

    pub fn with_response_ttl(mut self, ttl: u64) -> Self {
        self.response_ttl = ttl;
        self
    }

    pub fn with_consistency(mut self, consistency: ConsistencyPolicy) -> Self {
        self.consistency = consistency;
        self
    }

    async fn load_collection(&self) -> Result<Vec<Document>> {
        self.store
            .read()
            .await
            .map_err(|e| AppError::StoreRead(e.to_string()))
    }

    /// Persists `docs` and returns the compact snapshot to cache.
    async fn persist(&self, docs: &[Document]) -> Result<String> {
        let snapshot = to_compact(docs).map_err(|e| AppError::StoreWrite(e.to_string()))?;
        self.store
            .write(docs)
            .await
            .map_err(|e| AppError::StoreWrite(e.to_string()))?;
        Ok(snapshot)
    }

    /// Stores `snapshot` under the request's own key, first dropping the
    /// collection's entries when the path-prefix policy is active.
    async fn refresh_cache(&self, key: CacheKey, snapshot: String) {
        let mut cache = self.cache.write().await;

        if self.consistency == ConsistencyPolicy::PathPrefix {
            let dropped = cache.invalidate_prefix(COLLECTION_PATH);
            debug!("Dropped {} cache entries under {}", dropped, COLLECTION_PATH);
        }

        debug!("Caching {} for {}s", key, self.response_ttl);
        cache.set(key, snapshot, Some(self.response_ttl));
    }
}

/// Handler for GET /api/data
///
/// Serves from the cache when possible; otherwise reads the store, caches
/// the file text verbatim and responds with the parsed collection.
pub async fn list_handler(
    State(state): State<AppState>,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Value>> {
    let key = CacheKey::derive(uri.path(), &query);

    let cached = state.cache.write().await.get(&key);
    if let Some(cached) = cached {
        match serde_json::from_str(&cached) {
            Ok(value) => {
                debug!("Serving from cache: {}", key);
                return Ok(Json(value));
            }
            Err(e) => warn!("Discarding unparseable cache entry {}: {}", key, e),
        }
    }

    // A mutation may not land between our store read and the cache fill
    let _fill = state.store_lock.read().await;

    let raw = state
        .store
        .read_raw()
        .await
        .map_err(|e| AppError::StoreRead(e.to_string()))?;
    let parsed: Value =
        serde_json::from_str(&raw).map_err(|e| AppError::StoreRead(e.to_string()))?;

    state
        .cache
        .write()
        .await
        .set(key, raw, Some(state.response_ttl));

    Ok(Json(parsed))
}

/// Handler for POST /api/data
///
/// Appends the body to the collection.
pub async fn create_handler(
    State(state): State<AppState>,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
    body: std::result::Result<Json<Document>, JsonRejection>,
) -> Result<Json<CreateResponse>> {
    let Json(new_data) = body?;
    let _serial = state.store_lock.write().await;

    let mut docs = state.load_collection().await?;
    docs.push(new_data.clone());
    let snapshot = state.persist(&docs).await?;

    state
        .refresh_cache(CacheKey::derive(uri.path(), &query), snapshot)
        .await;
    info!("Added document, collection now holds {}", docs.len());

    Ok(Json(CreateResponse::new(new_data)))
}

/// Handler for PUT /api/data/:id
///
/// Shallow-merges the body into the first document with a matching id.
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
    body: std::result::Result<Json<Document>, JsonRejection>,
) -> Result<Json<UpdateResponse>> {
    let Json(updated_data) = body?;
    let _serial = state.store_lock.write().await;

    let mut docs = state.load_collection().await?;
    let index = parse_id(&id)
        .and_then(|id| position_of(&docs, id))
        .ok_or_else(|| AppError::NotFound(id.clone()))?;

    merge(&mut docs[index], &updated_data);
    let snapshot = state.persist(&docs).await?;

    state
        .refresh_cache(CacheKey::derive(uri.path(), &query), snapshot)
        .await;
    info!("Updated document {}", id);

    Ok(Json(UpdateResponse::new(updated_data)))
}

/// Handler for DELETE /api/data/:id
///
/// Removes the first document with a matching id.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<DeleteResponse>> {
    let _serial = state.store_lock.write().await;

    let mut docs = state.load_collection().await?;
    let index = parse_id(&id)
        .and_then(|id| position_of(&docs, id))
        .ok_or_else(|| AppError::NotFound(id.clone()))?;

    docs.remove(index);
    let snapshot = state.persist(&docs).await?;

    state
        .refresh_cache(CacheKey::derive(uri.path(), &query), snapshot)
        .await;
    info!("Deleted document {}", id);

    Ok(Json(DeleteResponse::new()))
}

/// Handler for POST /api/update-data
///
/// Re-reads the store and caches it under this request's own key.
pub async fn refresh_handler(
    State(state): State<AppState>,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<RefreshResponse>> {
    let _fill = state.store_lock.read().await;

    let raw = state
        .store
        .read_raw()
        .await
        .map_err(|e| AppError::StoreRead(e.to_string()))?;
    let updated: Value =
        serde_json::from_str(&raw).map_err(|e| AppError::StoreRead(e.to_string()))?;

    state
        .refresh_cache(CacheKey::derive(uri.path(), &query), updated.to_string())
        .await;
    info!("Cache refreshed from store");

    Ok(Json(RefreshResponse::new(updated)))
}

/// Handler for POST /api/invalidate-cache
///
/// Empties the whole cache.
pub async fn invalidate_handler(State(state): State<AppState>) -> &'static str {
    let removed = state.cache.write().await.flush_all();
    info!("Cache invalidated: {} entries removed", removed);
    "Cache invalidated"
}

/// Handler for GET /api/cache-stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.read().await.stats();
    Json(StatsResponse::from(stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
