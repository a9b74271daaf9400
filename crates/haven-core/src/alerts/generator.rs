//! Crisis alert generator - runs risk templates and orders their alerts

use chrono::{DateTime, Utc};

use crate::models::{AlertCategory, CrisisAlert, FinancialProfile};

use super::{DebtPressureTemplate, GoalAtRiskTemplate, SavingsDipTemplate, SpendingSpikeTemplate};

/// Thresholds the built-in templates fire on
#[derive(Debug, Clone, PartialEq)]
pub struct AlertThresholds {
    /// Annual expenses / income above which spending is flagged
    pub expense_ratio: f64,
    /// Months of expenses an emergency fund should cover
    pub emergency_fund_months: f64,
    /// Goals below this fraction of their target are at risk
    pub goal_progress: f64,
    /// Debt / income above which debt pressure is flagged
    pub debt_to_income: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            expense_ratio: 0.60,
            emergency_fund_months: 6.0,
            goal_progress: 0.75,
            debt_to_income: 0.35,
        }
    }
}

/// Inputs shared by every template
pub struct AlertContext<'a> {
    pub profile: &'a FinancialProfile,
    pub thresholds: &'a AlertThresholds,
    /// Reference time for effective timestamps
    pub now: DateTime<Utc>,
}

impl<'a> AlertContext<'a> {
    pub fn new(
        profile: &'a FinancialProfile,
        thresholds: &'a AlertThresholds,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            profile,
            thresholds,
            now,
        }
    }

    /// Context anchored at the current time
    pub fn now(profile: &'a FinancialProfile, thresholds: &'a AlertThresholds) -> Self {
        Self::new(profile, thresholds, Utc::now())
    }
}

/// A risk type that can be evaluated against a profile
pub trait RiskTemplate: Send + Sync {
    /// Category of alerts this template produces
    fn id(&self) -> AlertCategory;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Alerts for this risk (empty when the condition does not hold)
    fn evaluate(&self, ctx: &AlertContext<'_>) -> Vec<CrisisAlert>;
}

/// Evaluates the template catalog and orders the results
pub struct CrisisAlertGenerator {
    templates: Vec<Box<dyn RiskTemplate>>,
}

impl Default for CrisisAlertGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CrisisAlertGenerator {
    /// Create a generator with the built-in templates
    pub fn new() -> Self {
        let mut generator = Self::empty();

        generator.register(Box::new(SpendingSpikeTemplate));
        generator.register(Box::new(SavingsDipTemplate));
        generator.register(Box::new(GoalAtRiskTemplate));
        generator.register(Box::new(DebtPressureTemplate));

        generator
    }

    /// Create a generator with no templates
    pub fn empty() -> Self {
        Self { templates: vec![] }
    }

    /// Register a risk template
    pub fn register(&mut self, template: Box<dyn RiskTemplate>) {
        self.templates.push(template);
    }

    /// Evaluate every template; highest severity first, then most likely
    pub fn generate(&self, ctx: &AlertContext<'_>) -> Vec<CrisisAlert> {
        let mut all_alerts = vec![];

        for template in &self.templates {
            let alerts = template.evaluate(ctx);
            tracing::debug!(
                template = template.id().as_str(),
                count = alerts.len(),
                "Risk template evaluated"
            );
            all_alerts.extend(alerts);
        }

        all_alerts.sort_by(|a, b| {
            b.severity
                .priority()
                .cmp(&a.severity.priority())
                .then_with(|| b.probability.cmp(&a.probability))
        });

        all_alerts
    }

    /// Get list of registered template types
    pub fn template_types(&self) -> Vec<AlertCategory> {
        self.templates.iter().map(|t| t.id()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Goal, Severity};
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
    }

    fn demo_profile() -> FinancialProfile {
        FinancialProfile {
            income: 65000.0,
            expenses: 45000.0,
            savings: 15000.0,
            debt: 25000.0,
            goals: vec![
                Goal {
                    name: "Emergency Fund".into(),
                    target: 25000.0,
                    current: 15000.0,
                },
                Goal {
                    name: "Home Down Payment".into(),
                    target: 50000.0,
                    current: 5000.0,
                },
                Goal {
                    name: "Vacation Fund".into(),
                    target: 8000.0,
                    current: 2000.0,
                },
            ],
        }
    }

    struct AlwaysHigh;

    impl RiskTemplate for AlwaysHigh {
        fn id(&self) -> AlertCategory {
            AlertCategory::SpendingSpike
        }

        fn name(&self) -> &'static str {
            "Always High"
        }

        fn evaluate(&self, ctx: &AlertContext<'_>) -> Vec<CrisisAlert> {
            vec![CrisisAlert {
                category: AlertCategory::SpendingSpike,
                severity: Severity::High,
                title: "Custom".into(),
                description: String::new(),
                probability: 10,
                recommended_actions: vec![],
                effective_at: ctx.now,
            }]
        }
    }

    #[test]
    fn test_generator_creation() {
        let generator = CrisisAlertGenerator::new();
        let types = generator.template_types();

        assert!(types.contains(&AlertCategory::SpendingSpike));
        assert!(types.contains(&AlertCategory::SavingsDip));
        assert!(types.contains(&AlertCategory::GoalAtRisk));
        assert!(types.contains(&AlertCategory::DebtPressure));
    }

    #[test]
    fn test_alerts_sorted_by_severity_then_probability() {
        let generator = CrisisAlertGenerator::new();
        let thresholds = AlertThresholds::default();
        let profile = demo_profile();
        let ctx = AlertContext::new(&profile, &thresholds, fixed_now());

        let alerts = generator.generate(&ctx);
        assert!(alerts.len() >= 4);
        for pair in alerts.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.severity.priority() >= b.severity.priority());
            if a.severity == b.severity {
                assert!(a.probability >= b.probability);
            }
        }
        assert_eq!(alerts[0].category, AlertCategory::SpendingSpike);
    }

    #[test]
    fn test_healthy_profile_has_no_alerts() {
        let generator = CrisisAlertGenerator::new();
        let thresholds = AlertThresholds::default();
        let profile = FinancialProfile {
            income: 100000.0,
            expenses: 40000.0,
            savings: 30000.0,
            debt: 5000.0,
            goals: vec![Goal {
                name: "Car".into(),
                target: 10000.0,
                current: 9000.0,
            }],
        };
        let ctx = AlertContext::new(&profile, &thresholds, fixed_now());
        assert!(generator.generate(&ctx).is_empty());
    }

    #[test]
    fn test_custom_template_registration() {
        let mut generator = CrisisAlertGenerator::empty();
        generator.register(Box::new(AlwaysHigh));
        generator.register(Box::new(GoalAtRiskTemplate));

        let thresholds = AlertThresholds::default();
        let profile = demo_profile();
        let ctx = AlertContext::new(&profile, &thresholds, fixed_now());

        let alerts = generator.generate(&ctx);
        assert_eq!(alerts[0].title, "Custom");
        assert_eq!(alerts.len(), 4);
    }
}
