//! Liveness handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub config_version: Option<String>,
    pub config_fingerprint: Option<String>,
    pub timestamp: String,
}

/// GET /api/health - Liveness plus the engine config in effect
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let engine = state.engine.as_deref();

    Json(HealthResponse {
        status: if engine.is_some() { "ok" } else { "degraded" },
        config_version: engine.map(|e| e.version().to_string()),
        config_fingerprint: engine.map(|e| e.fingerprint().to_string()),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
