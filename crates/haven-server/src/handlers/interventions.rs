//! Micro-intervention handlers: trigger checks, spending pauses, habit stacks

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use haven_core::models::{BehavioralContext, TriggerTag};
use haven_core::{HabitStack, SpendingPause};

use super::{body, engine, required, respond, ApiResponse};
use crate::{AppError, AppState};

/// Request body for trigger detection
#[derive(Debug, Deserialize)]
pub struct TriggerRequest {
    #[serde(default)]
    pub behavior: BehavioralContext,
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TriggerResponse {
    pub triggers: Vec<TriggerTag>,
    pub intervention_recommended: bool,
}

/// Request body for starting a spending pause
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PauseRequest {
    #[serde(alias = "trigger_type")]
    pub trigger_type: Option<String>,
    /// Pause length in seconds
    pub duration: Option<u32>,
}

/// Request body for habit stacking suggestions
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitStackingRequest {
    #[serde(default, alias = "existing_habits")]
    pub existing_habits: Vec<String>,
    #[serde(default, alias = "financial_goals")]
    pub financial_goals: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HabitStackingResponse {
    pub suggestions: Vec<HabitStack>,
}

/// POST /api/interventions/trigger - Detect spending triggers
pub async fn detect_triggers(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TriggerRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<TriggerResponse>>, AppError> {
    let req = body(payload)?;
    let engine = engine(&state)?;

    let triggers: Vec<TriggerTag> = engine
        .detect_triggers(&req.behavior, req.text.as_deref())
        .into_iter()
        .collect();

    Ok(respond(
        "trigger_detection",
        TriggerResponse {
            intervention_recommended: !triggers.is_empty(),
            triggers,
        },
    ))
}

/// POST /api/interventions/pause - Start a spending pause
pub async fn start_spending_pause(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PauseRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SpendingPause>>, AppError> {
    let req = body(payload)?;
    let trigger_type = required(req.trigger_type, "triggerType")?;
    let engine = engine(&state)?;

    Ok(respond(
        "spending_pause",
        engine.spending_pause(&trigger_type, req.duration),
    ))
}

/// POST /api/interventions/habit-stacking - Pair habits with financial actions
pub async fn suggest_habit_stacking(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<HabitStackingRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<HabitStackingResponse>>, AppError> {
    let req = body(payload)?;
    if req.existing_habits.is_empty() {
        return Err(AppError::bad_request("existingHabits must not be empty"));
    }
    if req.financial_goals.is_empty() {
        return Err(AppError::bad_request("financialGoals must not be empty"));
    }
    let engine = engine(&state)?;

    Ok(respond(
        "habit_stacking",
        HabitStackingResponse {
            suggestions: engine.habit_stacks(&req.existing_habits, &req.financial_goals),
        },
    ))
}
