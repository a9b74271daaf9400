//! Opportunity cost of recurring discretionary spending
//!
//! `annual_cost = unit_cost × occurrences(frequency)`,
//! `projected_return = annual_cost × (1 + rate)`,
//! `forgone_growth = max(0, projected_return − annual_cost)`.
//! All amounts are rounded to cents.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Frequency, OpportunityCostEntry};

/// A named recurring-spend scenario with its alternative use of funds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub unit_cost: f64,
    pub frequency: Frequency,
    pub alternative: String,
    pub rate: f64,
    #[serde(default)]
    pub recommendation: Option<String>,
}

/// Opportunity cost calculator configuration
#[derive(Debug, Clone, PartialEq)]
pub struct OpportunityConfig {
    /// Rate of return used when a caller does not supply one
    pub default_rate: f64,
    /// Canonical scenarios evaluated when no explicit expense is given
    pub scenarios: Vec<Scenario>,
}

impl Default for OpportunityConfig {
    fn default() -> Self {
        Self {
            default_rate: 0.07,
            scenarios: Vec::new(),
        }
    }
}

/// Compute the opportunity cost of one recurring expense
pub fn opportunity_cost(
    unit_cost: f64,
    frequency: Frequency,
    rate: f64,
) -> Result<OpportunityCostEntry> {
    let scenario = Scenario {
        name: format!("{} expense of ${:.2}", capitalize(frequency.as_str()), unit_cost),
        unit_cost,
        frequency,
        alternative: format!("Invested at {:.1}% return", rate * 100.0),
        rate,
        recommendation: None,
    };
    evaluate(&scenario)
}

/// Compute the opportunity cost of a scenario
pub fn evaluate(scenario: &Scenario) -> Result<OpportunityCostEntry> {
    if !scenario.unit_cost.is_finite() || scenario.unit_cost < 0.0 {
        return Err(Error::validation("unit cost must be a non-negative number"));
    }
    if !scenario.rate.is_finite() || scenario.rate < -1.0 {
        return Err(Error::validation("rate of return must be a number >= -1.0"));
    }

    let annual_cost = round_cents(scenario.unit_cost * scenario.frequency.occurrences_per_year() as f64);
    let projected_return = round_cents(annual_cost * (1.0 + scenario.rate));
    let forgone_growth = round_cents((projected_return - annual_cost).max(0.0));

    Ok(OpportunityCostEntry {
        scenario: scenario.name.clone(),
        unit_cost: scenario.unit_cost,
        frequency: scenario.frequency,
        annual_cost,
        alternative: scenario.alternative.clone(),
        rate: scenario.rate,
        projected_return,
        forgone_growth,
        recommendation: scenario.recommendation.clone(),
    })
}

/// Evaluate a batch of scenarios, in order
pub fn evaluate_all(scenarios: &[Scenario]) -> Result<Vec<OpportunityCostEntry>> {
    scenarios.iter().map(evaluate).collect()
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_daily_coffee() {
        let entry = opportunity_cost(5.0, Frequency::Daily, 0.60).unwrap();
        assert_eq!(entry.annual_cost, 1825.0);
        assert_eq!(entry.projected_return, 2920.0);
        assert_eq!(entry.forgone_growth, 1095.0);
        assert_eq!(entry.scenario, "Daily expense of $5.00");
    }

    #[test]
    fn test_weekly_impulse_shopping() {
        let entry = opportunity_cost(50.0, Frequency::Weekly, 0.0).unwrap();
        assert_eq!(entry.annual_cost, 2600.0);
        assert_eq!(entry.projected_return, 2600.0);
        assert_eq!(entry.forgone_growth, 0.0);
    }

    #[test]
    fn test_monthly_subscriptions() {
        let entry = opportunity_cost(30.0, Frequency::Monthly, 0.10).unwrap();
        assert_eq!(entry.annual_cost, 360.0);
        assert_eq!(entry.projected_return, 396.0);
        assert_eq!(entry.forgone_growth, 36.0);
    }

    #[test]
    fn test_negative_rate_floors_growth() {
        let entry = opportunity_cost(10.0, Frequency::Weekly, -0.25).unwrap();
        assert_eq!(entry.annual_cost, 520.0);
        assert_eq!(entry.forgone_growth, 0.0);
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert!(opportunity_cost(-1.0, Frequency::Daily, 0.1).is_err());
        assert!(opportunity_cost(f64::NAN, Frequency::Daily, 0.1).is_err());
        assert!(opportunity_cost(1.0, Frequency::Daily, f64::INFINITY).is_err());
    }

    #[test]
    fn test_evaluate_all_keeps_order() {
        let scenarios = vec![
            Scenario {
                name: "Coffee".into(),
                unit_cost: 5.0,
                frequency: Frequency::Daily,
                alternative: "Index fund".into(),
                rate: 0.6,
                recommendation: Some("Brew at home".into()),
            },
            Scenario {
                name: "Shopping".into(),
                unit_cost: 50.0,
                frequency: Frequency::Weekly,
                alternative: "Emergency fund".into(),
                rate: 0.0,
                recommendation: None,
            },
        ];
        let entries = evaluate_all(&scenarios).unwrap();
        assert_eq!(entries[0].scenario, "Coffee");
        assert_eq!(entries[0].recommendation.as_deref(), Some("Brew at home"));
        assert_eq!(entries[1].annual_cost, 2600.0);
    }

    proptest! {
        #[test]
        fn prop_forgone_growth_never_negative(
            unit in 0.0f64..10_000.0,
            rate in 0.0f64..5.0,
            freq in prop_oneof![Just(Frequency::Daily), Just(Frequency::Weekly), Just(Frequency::Monthly)],
        ) {
            let entry = opportunity_cost(unit, freq, rate).unwrap();
            prop_assert!(entry.forgone_growth >= 0.0);
            prop_assert!(entry.projected_return >= entry.annual_cost);
        }
    }
}
