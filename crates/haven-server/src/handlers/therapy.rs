//! Emotional analysis handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use haven_core::models::{EmotionCategory, InterventionDescriptor};
use haven_core::EmotionalAnalysis;

use super::{body, engine, required, respond, ApiResponse};
use crate::{AppError, AppState};

/// Request body for emotion analysis
#[derive(Debug, Deserialize)]
pub struct AnalyzeEmotionRequest {
    pub text: Option<String>,
}

/// Request body for intervention lookup
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionsRequest {
    #[serde(alias = "emotional_state")]
    pub emotional_state: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InterventionsResponse {
    pub emotional_state: EmotionCategory,
    pub primary_intervention: Option<InterventionDescriptor>,
    pub secondary_interventions: Vec<InterventionDescriptor>,
}

/// POST /api/therapy/analyze-emotion - Classify text and recommend interventions
pub async fn analyze_emotion(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeEmotionRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<EmotionalAnalysis>>, AppError> {
    let req = body(payload)?;
    let text = required(req.text, "text")?;
    let engine = engine(&state)?;

    let analysis = engine.analyze_emotion(&text);
    debug!(
        primary = analysis.classification.primary.as_str(),
        triggers = analysis.triggers.len(),
        "Emotion analyzed"
    );

    Ok(respond("emotional_analysis", analysis))
}

/// POST /api/therapy/interventions - Interventions for a known emotional state
///
/// Unrecognized states get the neutral list.
pub async fn get_interventions(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<InterventionsRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<InterventionsResponse>>, AppError> {
    let req = body(payload)?;
    let raw_state = required(req.emotional_state, "emotionalState")?;
    let engine = engine(&state)?;

    let emotion = raw_state.parse::<EmotionCategory>().unwrap_or_else(|_| {
        debug!(state = %raw_state, "Unknown emotional state, using neutral");
        EmotionCategory::Neutral
    });

    let selected = engine.select_interventions(emotion);

    Ok(respond(
        "personalized_interventions",
        InterventionsResponse {
            emotional_state: emotion,
            primary_intervention: selected.first().cloned(),
            secondary_interventions: selected.iter().skip(1).cloned().collect(),
        },
    ))
}
