//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area. Engine routes
//! answer with a `{success, data, type}` envelope.

pub mod health;
pub mod interventions;
pub mod predictive;
pub mod therapy;

use axum::{extract::rejection::JsonRejection, Json};
use serde::Serialize;

use haven_core::WellnessEngine;

use crate::{AppError, AppState};

// Re-export all handlers for use in router
pub use health::*;
pub use interventions::*;
pub use predictive::*;
pub use therapy::*;

/// Success envelope for engine responses
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

pub(crate) fn respond<T: Serialize>(kind: &'static str, data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        data,
        kind,
    })
}

/// The shared engine, or 503 when it failed to initialize
pub(crate) fn engine(state: &AppState) -> Result<&WellnessEngine, AppError> {
    state
        .engine
        .as_deref()
        .ok_or_else(|| AppError::unavailable("Wellness engine unavailable"))
}

/// Unwrap a JSON body, turning extractor rejections into 400s
pub(crate) fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload.map(|Json(value)| value).map_err(AppError::rejection)
}

/// Require an optional request field
pub(crate) fn required<T>(value: Option<T>, name: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::bad_request(&format!("{} is required", name)))
}
