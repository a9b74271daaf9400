//! Built-in risk templates
//!
//! Probabilities are derived from how far the profile sits past each
//! threshold, so the same profile always yields the same alerts.

use chrono::Duration;

use crate::models::{AlertCategory, CrisisAlert, Severity};

use super::generator::{AlertContext, RiskTemplate};

/// Round to a whole percent inside 1..=99
fn probability(raw: f64) -> u8 {
    raw.round().clamp(1.0, 99.0) as u8
}

fn actions(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Expenses consuming too much of income
pub struct SpendingSpikeTemplate;

impl RiskTemplate for SpendingSpikeTemplate {
    fn id(&self) -> AlertCategory {
        AlertCategory::SpendingSpike
    }

    fn name(&self) -> &'static str {
        "Spending Spike"
    }

    fn evaluate(&self, ctx: &AlertContext<'_>) -> Vec<CrisisAlert> {
        let profile = ctx.profile;
        let threshold = ctx.thresholds.expense_ratio;

        let p = match profile.expense_ratio() {
            Some(ratio) if ratio > threshold => probability(ratio * 100.0 + 16.0),
            Some(_) => return vec![],
            // Spending with no income at all
            None if profile.expenses > 0.0 => 99,
            None => return vec![],
        };

        let severity = if p >= 75 { Severity::High } else { Severity::Medium };

        vec![CrisisAlert {
            category: self.id(),
            severity,
            title: "Spending spike likely".to_string(),
            description: format!(
                "{}% chance of overspending this week based on your expense pattern",
                p
            ),
            probability: p,
            recommended_actions: actions(&["Enable Alerts", "Review Triggers", "Set Spending Limit"]),
            effective_at: ctx.now + Duration::days(7),
        }]
    }
}

/// Emergency fund below the target number of months
pub struct SavingsDipTemplate;

impl RiskTemplate for SavingsDipTemplate {
    fn id(&self) -> AlertCategory {
        AlertCategory::SavingsDip
    }

    fn name(&self) -> &'static str {
        "Savings Dip"
    }

    fn evaluate(&self, ctx: &AlertContext<'_>) -> Vec<CrisisAlert> {
        let target = ctx.thresholds.emergency_fund_months;
        let coverage = match ctx.profile.emergency_coverage_months() {
            Some(months) if months < target => months,
            _ => return vec![],
        };

        let p = probability((1.0 - coverage / target) * 100.0 + 30.0);
        let severity = if coverage < 1.0 {
            Severity::High
        } else {
            Severity::Medium
        };

        vec![CrisisAlert {
            category: self.id(),
            severity,
            title: "Savings dip expected".to_string(),
            description: format!(
                "Emergency fund covers {:.1} of {:.0} recommended months of expenses",
                coverage, target
            ),
            probability: p,
            recommended_actions: actions(&["Adjust Budget", "Find Side Income", "Review Expenses"]),
            effective_at: ctx.now + Duration::days(30),
        }]
    }
}

/// Goals this close below the at-risk threshold alert with low severity
const GOAL_NEAR_THRESHOLD: f64 = 0.10;

/// One alert per goal that is well behind its target
pub struct GoalAtRiskTemplate;

impl RiskTemplate for GoalAtRiskTemplate {
    fn id(&self) -> AlertCategory {
        AlertCategory::GoalAtRisk
    }

    fn name(&self) -> &'static str {
        "Goal at Risk"
    }

    fn evaluate(&self, ctx: &AlertContext<'_>) -> Vec<CrisisAlert> {
        let threshold = ctx.thresholds.goal_progress;

        ctx.profile
            .goals
            .iter()
            .filter_map(|goal| {
                let progress = goal.progress();
                if progress >= threshold {
                    return None;
                }

                let p = probability((1.0 - progress) * 100.0 + 5.0);
                let severity = if progress >= threshold - GOAL_NEAR_THRESHOLD {
                    Severity::Low
                } else {
                    Severity::Medium
                };

                Some(CrisisAlert {
                    category: AlertCategory::GoalAtRisk,
                    severity,
                    title: format!("{} goal at risk", goal.name),
                    description: format!(
                        "{} is {:.0}% funded; current pace may miss the target",
                        goal.name,
                        progress * 100.0
                    ),
                    probability: p,
                    recommended_actions: actions(&[
                        "Increase Savings",
                        "Extend Timeline",
                        "Review Goals",
                    ]),
                    effective_at: ctx.now + Duration::days(90),
                })
            })
            .collect()
    }
}

/// Debt high relative to income
pub struct DebtPressureTemplate;

impl RiskTemplate for DebtPressureTemplate {
    fn id(&self) -> AlertCategory {
        AlertCategory::DebtPressure
    }

    fn name(&self) -> &'static str {
        "Debt Pressure"
    }

    fn evaluate(&self, ctx: &AlertContext<'_>) -> Vec<CrisisAlert> {
        let threshold = ctx.thresholds.debt_to_income;
        let dti = match ctx.profile.debt_to_income() {
            Some(dti) if dti > threshold => dti,
            _ => return vec![],
        };

        let p = probability(dti * 100.0 + 20.0);
        let severity = if dti > 1.0 {
            Severity::High
        } else {
            Severity::Medium
        };

        vec![CrisisAlert {
            category: self.id(),
            severity,
            title: "Debt pressure building".to_string(),
            description: format!(
                "Debt is {:.0}% of annual income; payments may crowd out savings",
                dti * 100.0
            ),
            probability: p,
            recommended_actions: actions(&["Review Debt", "Plan Payoff", "Avoid New Credit"]),
            effective_at: ctx.now + Duration::days(60),
        }]
    }
}
