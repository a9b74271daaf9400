//! Crisis Alerts - probability-scored financial risk warnings
//!
//! The alert generator evaluates a catalog of risk templates against a
//! financial profile. Each template decides whether its risk applies and how
//! likely it is; the generator only collects and orders the results.
//!
//! ## Built-in Templates
//!
//! - **Spending Spike** - expenses consume most of income
//! - **Savings Dip** - emergency fund covers too few months of expenses
//! - **Goal at Risk** - a savings goal is well behind its target
//! - **Debt Pressure** - debt is high relative to income
//!
//! ## Usage
//!
//! ```rust,ignore
//! use haven_core::alerts::{AlertContext, CrisisAlertGenerator};
//!
//! let generator = CrisisAlertGenerator::new();
//! let ctx = AlertContext::now(&profile, &thresholds);
//! let alerts = generator.generate(&ctx);
//! ```

pub mod generator;
pub mod templates;

pub use generator::{AlertContext, AlertThresholds, CrisisAlertGenerator, RiskTemplate};
pub use templates::{
    DebtPressureTemplate, GoalAtRiskTemplate, SavingsDipTemplate, SpendingSpikeTemplate,
};
