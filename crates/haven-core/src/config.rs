//! Engine configuration
//!
//! Lexicons, the intervention policy, forecast bands and alert thresholds are
//! data, not code. A default `engine.toml` is compiled into the binary; a user
//! file layered on top replaces whole sections (a `[[emotions]]` list in the
//! override replaces the entire emotion lexicon) and individual scalar keys.
//!
//! Resolution order:
//! 1. Explicit path (`--config` / `HAVEN_CONFIG`), which must exist
//! 2. `~/.local/share/haven/config/engine.toml` if present
//! 3. The embedded default

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::alerts::AlertThresholds;
use crate::error::{Error, Result};
use crate::forecast::{ForecastConfig, RiskBand, MAX_FORECAST_MONTHS};
use crate::interventions::InterventionPolicy;
use crate::lexicon::Lexicon;
use crate::models::{
    EmotionCategory, InterventionDescriptor, InterventionType, RiskLevel, TriggerTag,
};
use crate::opportunity::{OpportunityConfig, Scenario};

/// Embedded default configuration
pub const DEFAULT_CONFIG: &str = include_str!("../../../config/engine.toml");

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Embedded,
    File(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded => write!(f, "embedded"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Immutable engine configuration, loaded once at startup
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub version: String,
    /// Short sha256 of the config text in effect
    pub fingerprint: String,
    pub source: ConfigSource,
    pub emotions: Lexicon<EmotionCategory>,
    pub triggers: Lexicon<TriggerTag>,
    pub interventions: InterventionPolicy,
    pub forecast: ForecastConfig,
    pub opportunity: OpportunityConfig,
    pub alerts: AlertThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::embedded().unwrap_or_else(|e| {
            warn!(error = %e, "Embedded engine config failed to parse, using empty tables");
            Self::bare()
        })
    }
}

impl EngineConfig {
    /// Built-in defaults with empty lexicons and policy
    fn bare() -> Self {
        Self {
            version: "unversioned".to_string(),
            fingerprint: fingerprint(&[]),
            source: ConfigSource::Embedded,
            emotions: Lexicon::new(),
            triggers: Lexicon::new(),
            interventions: InterventionPolicy::new(),
            forecast: ForecastConfig::default(),
            opportunity: OpportunityConfig::default(),
            alerts: AlertThresholds::default(),
        }
    }

    /// The configuration compiled into the binary
    pub fn embedded() -> Result<Self> {
        let mut config = parse_config(DEFAULT_CONFIG, Self::bare())?;
        config.fingerprint = fingerprint(&[DEFAULT_CONFIG]);
        config.source = ConfigSource::Embedded;
        Ok(config)
    }

    /// Load configuration (explicit path, then default override, then embedded)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let override_path = match path {
            Some(p) if p.exists() => Some(p.to_path_buf()),
            Some(p) => {
                return Err(Error::InvalidData(format!(
                    "Config file not found: {}",
                    p.display()
                )))
            }
            None => default_config_path().filter(|p| p.exists()),
        };

        let config = match override_path {
            Some(path) => Self::from_file(&path)?,
            None => Self::embedded()?,
        };

        info!(
            source = %config.source,
            version = %config.version,
            fingerprint = %config.fingerprint,
            "Engine config loaded"
        );

        Ok(config)
    }

    /// Layer a config file over the embedded defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::InvalidData(format!("Failed to read config: {}", e)))?;
        Self::from_toml_layered(&content, ConfigSource::File(path.to_path_buf()))
    }

    /// Layer TOML text over the embedded defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        Self::from_toml_layered(content, ConfigSource::Embedded)
    }

    fn from_toml_layered(content: &str, source: ConfigSource) -> Result<Self> {
        let base = Self::embedded()?;
        let mut config = parse_config(content, base)?;
        config.fingerprint = fingerprint(&[DEFAULT_CONFIG, content]);
        config.source = source;
        Ok(config)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("haven").join("config").join("engine.toml"))
}

fn fingerprint(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    let digest = hex::encode(hasher.finalize());
    digest[..12].to_string()
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    engine: Option<RawEngine>,
    emotions: Option<Vec<RawLexiconEntry>>,
    triggers: Option<Vec<RawTriggerEntry>>,
    interventions: Option<Vec<RawIntervention>>,
    forecast: Option<RawForecast>,
    opportunity: Option<RawOpportunity>,
    alerts: Option<RawAlerts>,
}

#[derive(Debug, Deserialize)]
struct RawEngine {
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLexiconEntry {
    category: String,
    #[serde(default)]
    keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTriggerEntry {
    tag: String,
    #[serde(default)]
    keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawIntervention {
    emotion: String,
    #[serde(rename = "type")]
    intervention_type: InterventionType,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    action: String,
    duration: Option<u32>,
    amount: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    delta_min: Option<i32>,
    delta_max: Option<i32>,
    default_months: Option<u32>,
    default_risk: Option<RiskLevel>,
    risk_bands: Option<Vec<RiskBand>>,
    health_weights: Option<RawHealthWeights>,
}

#[derive(Debug, Deserialize)]
struct RawHealthWeights {
    savings_rate: Option<f64>,
    emergency_fund: Option<f64>,
    debt: Option<f64>,
    goals: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawOpportunity {
    default_rate: Option<f64>,
    scenarios: Option<Vec<Scenario>>,
}

#[derive(Debug, Deserialize)]
struct RawAlerts {
    expense_ratio_threshold: Option<f64>,
    emergency_fund_months: Option<f64>,
    goal_progress_threshold: Option<f64>,
    debt_to_income_threshold: Option<f64>,
}

/// Parse TOML content onto a base configuration
fn parse_config(content: &str, base: EngineConfig) -> Result<EngineConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::InvalidData(format!("Invalid config TOML: {}", e)))?;

    let mut config = base;

    if let Some(version) = raw.engine.and_then(|e| e.version) {
        config.version = version;
    }

    if let Some(entries) = raw.emotions {
        let mut lexicon = Lexicon::new();
        for entry in entries {
            match entry.category.parse::<EmotionCategory>() {
                Ok(category) => lexicon.set(category, &entry.keywords),
                Err(_) => {
                    warn!(category = %entry.category, "Skipping unknown emotion category");
                }
            }
        }
        config.emotions = lexicon;
    }

    if let Some(entries) = raw.triggers {
        let mut lexicon = Lexicon::new();
        for entry in entries {
            match entry.tag.parse::<TriggerTag>() {
                Ok(tag) => lexicon.set(tag, &entry.keywords),
                Err(_) => warn!(tag = %entry.tag, "Skipping unknown trigger tag"),
            }
        }
        config.triggers = lexicon;
    }

    if let Some(entries) = raw.interventions {
        let mut policy = InterventionPolicy::new();
        for entry in entries {
            let emotion = match entry.emotion.parse::<EmotionCategory>() {
                Ok(emotion) => emotion,
                Err(_) => {
                    warn!(emotion = %entry.emotion, "Skipping intervention for unknown emotion");
                    continue;
                }
            };
            policy.push(
                emotion,
                InterventionDescriptor {
                    intervention_type: entry.intervention_type,
                    title: entry.title,
                    description: entry.description,
                    action: entry.action,
                    duration: entry.duration,
                    amount: entry.amount,
                },
            );
        }
        config.interventions = policy;
    }

    if let Some(forecast) = raw.forecast {
        let target = &mut config.forecast;
        if let Some(min) = forecast.delta_min {
            target.delta_min = min;
        }
        if let Some(max) = forecast.delta_max {
            target.delta_max = max;
        }
        if let Some(months) = forecast.default_months {
            target.default_months = months;
        }
        if let Some(risk) = forecast.default_risk {
            target.default_risk = risk;
        }
        if let Some(bands) = forecast.risk_bands {
            target.risk_bands = bands;
        }
        if let Some(weights) = forecast.health_weights {
            let w = &mut target.health_weights;
            if let Some(v) = weights.savings_rate {
                w.savings_rate = v;
            }
            if let Some(v) = weights.emergency_fund {
                w.emergency_fund = v;
            }
            if let Some(v) = weights.debt {
                w.debt = v;
            }
            if let Some(v) = weights.goals {
                w.goals = v;
            }
        }
        target.health_weights = target.health_weights.normalized();
    }

    if let Some(opportunity) = raw.opportunity {
        if let Some(rate) = opportunity.default_rate {
            config.opportunity.default_rate = rate;
        }
        if let Some(scenarios) = opportunity.scenarios {
            config.opportunity.scenarios = scenarios;
        }
    }

    if let Some(alerts) = raw.alerts {
        let target = &mut config.alerts;
        if let Some(v) = alerts.expense_ratio_threshold {
            target.expense_ratio = v;
        }
        if let Some(v) = alerts.emergency_fund_months {
            target.emergency_fund_months = v;
        }
        if let Some(v) = alerts.goal_progress_threshold {
            target.goal_progress = v;
        }
        if let Some(v) = alerts.debt_to_income_threshold {
            target.debt_to_income = v;
        }
    }

    validate(&config)?;
    Ok(config)
}

fn validate(config: &EngineConfig) -> Result<()> {
    let forecast = &config.forecast;
    if forecast.delta_min > forecast.delta_max {
        return Err(Error::InvalidData(format!(
            "forecast.delta_min ({}) exceeds delta_max ({})",
            forecast.delta_min, forecast.delta_max
        )));
    }
    if forecast.default_months == 0 || forecast.default_months > MAX_FORECAST_MONTHS {
        return Err(Error::InvalidData(format!(
            "forecast.default_months must be between 1 and {}",
            MAX_FORECAST_MONTHS
        )));
    }

    let rate = config.opportunity.default_rate;
    if !rate.is_finite() || rate < -1.0 {
        return Err(Error::InvalidData(
            "opportunity.default_rate must be a number >= -1.0".to_string(),
        ));
    }

    let alerts = &config.alerts;
    let thresholds = [
        ("expense_ratio_threshold", alerts.expense_ratio),
        ("emergency_fund_months", alerts.emergency_fund_months),
        ("goal_progress_threshold", alerts.goal_progress),
        ("debt_to_income_threshold", alerts.debt_to_income),
    ];
    for (name, value) in thresholds {
        if !value.is_finite() || value <= 0.0 {
            return Err(Error::InvalidData(format!(
                "alerts.{} must be a positive number",
                name
            )));
        }
    }

    Ok(())
}
