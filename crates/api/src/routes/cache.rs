use axum::{Json, extract::State};
use tracing::info;

use crate::state::AppState;

/// Empties the translation cache. Idempotent.
pub async fn clear(State(state): State<AppState>) -> Json<serde_json::Value> {
    state.pipeline.cache.clear();
    info!("Translation cache cleared");
    Json(serde_json::json!({ "status": "cleared" }))
}
