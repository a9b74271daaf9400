//! Predictive analytics handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use haven_core::models::{
    CrisisAlert, FinancialProfile, ForecastResult, Frequency, OpportunityCostEntry,
};
use haven_core::{LifeEvent, LifeEventPlan, RandomDelta};

use super::{body, engine, required, respond, ApiResponse};
use crate::{AppError, AppState};

/// Request body for a health forecast
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    #[serde(alias = "financial_profile")]
    pub financial_profile: Option<FinancialProfile>,
    #[serde(alias = "current_score")]
    pub current_score: Option<u8>,
    pub months: Option<u32>,
    /// Pins the score adjustment for reproducible results
    pub seed: Option<u64>,
}

/// Request body for crisis alerts
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisAlertsRequest {
    #[serde(alias = "financial_profile")]
    pub financial_profile: Option<FinancialProfile>,
}

#[derive(Debug, Serialize)]
pub struct CrisisAlertsResponse {
    pub alerts: Vec<CrisisAlert>,
    pub count: usize,
}

/// Request body for opportunity costs; empty means the scenario catalog
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityCostRequest {
    #[serde(alias = "unit_cost")]
    pub unit_cost: Option<f64>,
    pub frequency: Option<Frequency>,
    pub rate: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct OpportunityCostResponse {
    pub entries: Vec<OpportunityCostEntry>,
    pub total_annual_cost: f64,
    pub total_forgone_growth: f64,
}

/// Request body for life-event planning
#[derive(Debug, Deserialize)]
pub struct LifeEventsRequest {
    #[serde(default)]
    pub events: Vec<LifeEvent>,
}

#[derive(Debug, Serialize)]
pub struct LifeEventsResponse {
    pub plans: Vec<LifeEventPlan>,
    pub total_monthly_savings: u64,
}

/// POST /api/predictive/forecast - Project the financial health score
pub async fn forecast(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ForecastRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ForecastResult>>, AppError> {
    let req = body(payload)?;
    let profile = required(req.financial_profile, "financialProfile")?;
    let engine = engine(&state)?;

    let result = match req.seed {
        Some(seed) => engine.forecast_health_with(
            &profile,
            req.current_score,
            req.months,
            &mut RandomDelta::seeded(seed),
        ),
        None => engine.forecast_health(&profile, req.current_score, req.months),
    }
    .map_err(AppError::engine)?;

    Ok(respond("financial_forecast", result))
}

/// POST /api/predictive/crisis-alerts - Probability-scored risk warnings
pub async fn crisis_alerts(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CrisisAlertsRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CrisisAlertsResponse>>, AppError> {
    let req = body(payload)?;
    let profile = required(req.financial_profile, "financialProfile")?;
    let engine = engine(&state)?;

    let alerts = engine
        .generate_crisis_alerts(&profile)
        .map_err(AppError::engine)?;

    Ok(respond(
        "crisis_alerts",
        CrisisAlertsResponse {
            count: alerts.len(),
            alerts,
        },
    ))
}

/// POST /api/predictive/opportunity-costs - Forgone growth of recurring spending
///
/// With `unitCost` set, computes that single expense (frequency defaults to
/// daily, rate to the configured default). Otherwise evaluates the catalog.
pub async fn opportunity_costs(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<OpportunityCostRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<OpportunityCostResponse>>, AppError> {
    let req = body(payload)?;
    let engine = engine(&state)?;

    let entries = match req.unit_cost {
        Some(unit_cost) => {
            let frequency = req.frequency.unwrap_or(Frequency::Daily);
            vec![engine
                .opportunity_cost(unit_cost, frequency, req.rate)
                .map_err(AppError::engine)?]
        }
        None => engine.opportunity_costs().map_err(AppError::engine)?,
    };

    let total_annual_cost: f64 = entries.iter().map(|e| e.annual_cost).sum();
    let total_forgone_growth: f64 = entries.iter().map(|e| e.forgone_growth).sum();

    Ok(respond(
        "opportunity_costs",
        OpportunityCostResponse {
            entries,
            total_annual_cost,
            total_forgone_growth,
        },
    ))
}

/// POST /api/predictive/life-events - Monthly savings plans for upcoming events
pub async fn life_events(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LifeEventsRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<LifeEventsResponse>>, AppError> {
    let req = body(payload)?;
    if req.events.is_empty() {
        return Err(AppError::bad_request("events must not be empty"));
    }
    let engine = engine(&state)?;

    let plans = engine
        .plan_life_events(&req.events)
        .map_err(AppError::engine)?;
    let total_monthly_savings: u64 = plans.iter().map(|p| p.monthly_savings).sum();

    Ok(respond(
        "life_events",
        LifeEventsResponse {
            plans,
            total_monthly_savings,
        },
    ))
}
