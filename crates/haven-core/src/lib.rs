//! Haven Core Library
//!
//! Decision engine for the Haven financial wellness service:
//! - Keyword lexicons and emotion classification for free text
//! - Spending trigger detection from text and behavioral context
//! - Per-emotion intervention policy
//! - Health score forecasting with injectable randomness
//! - Opportunity cost of recurring discretionary spending
//! - Crisis alerts from pluggable risk templates
//! - Spending pauses, habit stacks and life-event savings plans
//!
//! All operations are synchronous and side-effect free; the only I/O is
//! loading the engine configuration.

pub mod alerts;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod forecast;
pub mod interventions;
pub mod lexicon;
pub mod models;
pub mod opportunity;
pub mod planning;
pub mod triggers;

pub use alerts::{AlertContext, AlertThresholds, CrisisAlertGenerator, RiskTemplate};
pub use classifier::Classification;
pub use config::{ConfigSource, EngineConfig};
pub use engine::{EmotionalAnalysis, WellnessEngine};
pub use error::{Error, ErrorClass, Result};
pub use forecast::{DeltaSource, FixedDelta, ForecastConfig, RandomDelta};
pub use interventions::{InterventionPolicy, ResponsePlan};
pub use lexicon::Lexicon;
pub use opportunity::Scenario;
pub use planning::{HabitStack, Impact, LifeEvent, LifeEventPlan, SpendingPause};
