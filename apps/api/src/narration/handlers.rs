use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::narration::{CacheStats, CachedClip, NarrationCache};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ClipQuery {
    pub voice_id: String,
    pub text: String,
}

#[derive(Deserialize)]
pub struct StoreClipRequest {
    pub voice_id: String,
    pub text: String,
    pub media_url: String,
    pub duration_ms: u64,
}

/// GET /api/v1/narration/cache/stats
pub async fn handle_cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    let cache = state.narration_cache.lock().await;
    Json(cache.stats())
}

/// GET /api/v1/narration/cache?voice_id=..&text=..
pub async fn handle_cache_lookup(
    State(state): State<AppState>,
    Query(query): Query<ClipQuery>,
) -> Result<Json<CachedClip>, AppError> {
    let mut cache = state.narration_cache.lock().await;
    cache
        .get(&query.voice_id, &query.text)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No cached clip for that phrase".to_string()))
}

/// PUT /api/v1/narration/cache
pub async fn handle_cache_store(
    State(state): State<AppState>,
    Json(req): Json<StoreClipRequest>,
) -> Result<StatusCode, AppError> {
    if !NarrationCache::is_cacheable(&req.text) {
        return Err(AppError::UnprocessableEntity(
            "Phrase is not on the cacheable list".to_string(),
        ));
    }
    let mut cache = state.narration_cache.lock().await;
    cache.insert(&req.voice_id, &req.text, req.media_url, req.duration_ms);
    Ok(StatusCode::NO_CONTENT)
}
