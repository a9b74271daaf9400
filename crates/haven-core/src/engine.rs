//! Wellness engine facade
//!
//! Owns the immutable configuration and exposes every engine operation as a
//! plain synchronous call. The engine holds no mutable state, so one instance
//! is shared across request handlers behind an `Arc` without locking.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::alerts::{AlertContext, CrisisAlertGenerator};
use crate::classifier::{self, Classification};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::forecast::{DeltaSource, ForecastEstimator, RandomDelta};
use crate::interventions::ResponsePlan;
use crate::models::{
    BehavioralContext, CrisisAlert, EmotionCategory, FinancialProfile, ForecastResult, Frequency,
    InterventionDescriptor, OpportunityCostEntry, TriggerTag,
};
use crate::opportunity::{self, Scenario};
use crate::planning::{self, HabitStack, LifeEvent, LifeEventPlan, SpendingPause};
use crate::triggers;

/// Classification, text triggers and recommended interventions for one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalAnalysis {
    pub classification: Classification,
    pub triggers: Vec<TriggerTag>,
    pub plan: ResponsePlan,
}

pub struct WellnessEngine {
    config: Arc<EngineConfig>,
    alerts: CrisisAlertGenerator,
}

impl WellnessEngine {
    /// Engine over the embedded default configuration
    pub fn new() -> Result<Self> {
        Ok(Self::with_config(EngineConfig::embedded()?))
    }

    /// Engine over a resolved configuration (see [`EngineConfig::load`])
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Ok(Self::with_config(EngineConfig::load(path)?))
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config: Arc::new(config),
            alerts: CrisisAlertGenerator::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn version(&self) -> &str {
        &self.config.version
    }

    pub fn fingerprint(&self) -> &str {
        &self.config.fingerprint
    }

    // ========== Emotion & triggers ==========

    pub fn classify_emotion(&self, text: &str) -> Classification {
        classifier::classify(&self.config.emotions, text)
    }

    pub fn detect_text_triggers(&self, text: &str) -> BTreeSet<TriggerTag> {
        triggers::detect_text_triggers(&self.config.triggers, text)
    }

    pub fn detect_behavioral_triggers(&self, context: &BehavioralContext) -> BTreeSet<TriggerTag> {
        triggers::detect_behavioral_triggers(context)
    }

    /// Union of behavioral and (optional) free-text triggers
    pub fn detect_triggers(
        &self,
        context: &BehavioralContext,
        text: Option<&str>,
    ) -> BTreeSet<TriggerTag> {
        let mut found = self.detect_behavioral_triggers(context);
        if let Some(text) = text {
            found.extend(self.detect_text_triggers(text));
        }
        found
    }

    pub fn select_interventions(&self, emotion: EmotionCategory) -> &[InterventionDescriptor] {
        self.config.interventions.select(emotion)
    }

    pub fn response_plan(
        &self,
        emotion: EmotionCategory,
        triggers: &BTreeSet<TriggerTag>,
    ) -> ResponsePlan {
        self.config.interventions.plan(emotion, triggers)
    }

    /// Classify text, detect its triggers and build a response plan
    pub fn analyze_emotion(&self, text: &str) -> EmotionalAnalysis {
        let classification = self.classify_emotion(text);
        let triggers = self.detect_text_triggers(text);
        let plan = self.response_plan(classification.primary, &triggers);

        EmotionalAnalysis {
            classification,
            triggers: triggers.into_iter().collect(),
            plan,
        }
    }

    // ========== Forecasting ==========

    pub fn health_score(&self, profile: &FinancialProfile) -> u8 {
        ForecastEstimator::new(&self.config.forecast).health_score(profile)
    }

    /// Forecast with a fresh entropy-seeded generator
    pub fn forecast_health(
        &self,
        profile: &FinancialProfile,
        current_score: Option<u8>,
        months: Option<u32>,
    ) -> Result<ForecastResult> {
        let mut source = RandomDelta::from_entropy();
        self.forecast_health_with(profile, current_score, months, &mut source)
    }

    /// Forecast with a caller-supplied adjustment source
    ///
    /// When `current_score` is absent it is derived from the profile.
    pub fn forecast_health_with(
        &self,
        profile: &FinancialProfile,
        current_score: Option<u8>,
        months: Option<u32>,
        source: &mut dyn DeltaSource,
    ) -> Result<ForecastResult> {
        profile.validate()?;

        let estimator = ForecastEstimator::new(&self.config.forecast);
        let current = match current_score {
            Some(score) => score,
            None => estimator.health_score(profile),
        };
        let months = months.unwrap_or(self.config.forecast.default_months);

        estimator.forecast(current, months, source)
    }

    // ========== Opportunity cost ==========

    /// Opportunity cost of one expense; `rate` defaults to the configured rate
    pub fn opportunity_cost(
        &self,
        unit_cost: f64,
        frequency: Frequency,
        rate: Option<f64>,
    ) -> Result<OpportunityCostEntry> {
        let rate = rate.unwrap_or(self.config.opportunity.default_rate);
        opportunity::opportunity_cost(unit_cost, frequency, rate)
    }

    /// Evaluate the configured scenario catalog
    pub fn opportunity_costs(&self) -> Result<Vec<OpportunityCostEntry>> {
        self.opportunity_costs_for(&self.config.opportunity.scenarios)
    }

    /// Evaluate caller-supplied scenarios
    pub fn opportunity_costs_for(&self, scenarios: &[Scenario]) -> Result<Vec<OpportunityCostEntry>> {
        opportunity::evaluate_all(scenarios)
    }

    // ========== Crisis alerts ==========

    pub fn generate_crisis_alerts(&self, profile: &FinancialProfile) -> Result<Vec<CrisisAlert>> {
        self.generate_crisis_alerts_at(profile, Utc::now())
    }

    /// Generate alerts with effective times anchored at `now`
    pub fn generate_crisis_alerts_at(
        &self,
        profile: &FinancialProfile,
        now: DateTime<Utc>,
    ) -> Result<Vec<CrisisAlert>> {
        profile.validate()?;

        let ctx = AlertContext::new(profile, &self.config.alerts, now);
        let alerts = self.alerts.generate(&ctx);

        debug!(count = alerts.len(), "Crisis alerts generated");
        Ok(alerts)
    }

    // ========== Planning ==========

    pub fn spending_pause(&self, trigger_type: &str, duration_secs: Option<u32>) -> SpendingPause {
        planning::spending_pause(trigger_type, duration_secs)
    }

    pub fn habit_stacks(&self, existing: &[String], goals: &[String]) -> Vec<HabitStack> {
        planning::habit_stacks(existing, goals)
    }

    pub fn plan_life_events(&self, events: &[LifeEvent]) -> Result<Vec<LifeEventPlan>> {
        events.iter().map(planning::plan_life_event).collect()
    }
}
