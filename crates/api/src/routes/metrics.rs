use axum::{Json, extract::State};
use tracing::info;

use crate::state::AppState;

/// Current pipeline counters plus derived rates and the live cache size.
pub async fn get(State(state): State<AppState>) -> Json<serde_json::Value> {
    let snapshot = state.pipeline.metrics.snapshot();
    Json(serde_json::json!({
        "metrics": snapshot,
        "cache_size": state.pipeline.cache.len(),
    }))
}

/// Operator-only counter reset.
pub async fn reset(State(state): State<AppState>) -> Json<serde_json::Value> {
    state.pipeline.metrics.reset();
    info!("Pipeline metrics reset");
    Json(serde_json::json!({ "status": "reset" }))
}
