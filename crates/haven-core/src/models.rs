//! Data models for Haven
//!
//! Every type here is a request-scoped value: built from caller input,
//! consumed by the engine, and dropped once the response is produced.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Primary emotional state detected in free text
///
/// Declaration order is the canonical tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionCategory {
    Stressed,
    Excited,
    Sad,
    Neutral,
}

impl EmotionCategory {
    /// All categories in canonical order
    pub const ALL: [EmotionCategory; 4] = [
        EmotionCategory::Stressed,
        EmotionCategory::Excited,
        EmotionCategory::Sad,
        EmotionCategory::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stressed => "stressed",
            Self::Excited => "excited",
            Self::Sad => "sad",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for EmotionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EmotionCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stressed" => Ok(Self::Stressed),
            "excited" => Ok(Self::Excited),
            "sad" => Ok(Self::Sad),
            "neutral" => Ok(Self::Neutral),
            _ => Err(format!("Unknown emotion: {}", s)),
        }
    }
}

/// Behavioral or emotional precursor to discretionary spending
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerTag {
    RetailTherapy,
    StressRelief,
    Celebration,
    Boredom,
    Location,
    TimeOfDay,
    Stress,
}

impl TriggerTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RetailTherapy => "retail_therapy",
            Self::StressRelief => "stress_relief",
            Self::Celebration => "celebration",
            Self::Boredom => "boredom",
            Self::Location => "location",
            Self::TimeOfDay => "time_of_day",
            Self::Stress => "stress",
        }
    }
}

impl fmt::Display for TriggerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TriggerTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "retail_therapy" => Ok(Self::RetailTherapy),
            "stress_relief" => Ok(Self::StressRelief),
            "celebration" => Ok(Self::Celebration),
            "boredom" => Ok(Self::Boredom),
            "location" => Ok(Self::Location),
            "time_of_day" => Ok(Self::TimeOfDay),
            "stress" => Ok(Self::Stress),
            _ => Err(format!("Unknown trigger: {}", s)),
        }
    }
}

/// Structured behavioral context supplied with a trigger check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehavioralContext {
    pub location: Option<String>,
    pub mood: Option<String>,
    pub time: Option<String>,
}

/// Kind of recommended intervention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionType {
    SpendingPause,
    Mindfulness,
    AlternativeActivity,
    CommunitySupport,
    SavingsTransfer,
    BudgetReview,
    GoalCheck,
}

impl InterventionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SpendingPause => "spending_pause",
            Self::Mindfulness => "mindfulness",
            Self::AlternativeActivity => "alternative_activity",
            Self::CommunitySupport => "community_support",
            Self::SavingsTransfer => "savings_transfer",
            Self::BudgetReview => "budget_review",
            Self::GoalCheck => "goal_check",
        }
    }
}

/// A recommended action from the intervention policy table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionDescriptor {
    #[serde(rename = "type")]
    pub intervention_type: InterventionType,
    pub title: String,
    pub description: String,
    pub action: String,
    /// Pause length in seconds (spending pauses only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Suggested transfer amount (savings transfers only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

/// A savings goal within a financial profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub name: String,
    pub target: f64,
    #[serde(default)]
    pub current: f64,
}

impl Goal {
    /// Fraction of the target already saved, clamped to [0, 1]
    pub fn progress(&self) -> f64 {
        if self.target <= 0.0 {
            return 1.0;
        }
        (self.current / self.target).clamp(0.0, 1.0)
    }
}

/// Annual financial profile supplied per request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub income: f64,
    pub expenses: f64,
    #[serde(default)]
    pub savings: f64,
    #[serde(default)]
    pub debt: f64,
    #[serde(default)]
    pub goals: Vec<Goal>,
}

impl FinancialProfile {
    pub fn monthly_expenses(&self) -> f64 {
        self.expenses / 12.0
    }

    /// Annual expenses as a fraction of income (None when income is not positive)
    pub fn expense_ratio(&self) -> Option<f64> {
        (self.income > 0.0).then(|| self.expenses / self.income)
    }

    /// Share of income left after expenses (None when income is not positive)
    pub fn savings_rate(&self) -> Option<f64> {
        (self.income > 0.0).then(|| (self.income - self.expenses) / self.income)
    }

    /// Months of expenses covered by savings (None when there are no expenses)
    pub fn emergency_coverage_months(&self) -> Option<f64> {
        let monthly = self.monthly_expenses();
        (monthly > 0.0).then(|| self.savings / monthly)
    }

    /// Debt as a fraction of income (None when income is not positive)
    pub fn debt_to_income(&self) -> Option<f64> {
        (self.income > 0.0).then(|| self.debt / self.income)
    }

    /// Check the numeric fields are finite and non-negative
    pub fn validate(&self) -> crate::Result<()> {
        let fields = [
            ("income", self.income),
            ("expenses", self.expenses),
            ("savings", self.savings),
            ("debt", self.debt),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(crate::Error::validation(format!(
                    "{} must be a non-negative number",
                    name
                )));
            }
        }
        for goal in &self.goals {
            if !goal.target.is_finite() || !goal.current.is_finite() {
                return Err(crate::Error::validation(format!(
                    "goal '{}' has a non-numeric amount",
                    goal.name
                )));
            }
        }
        Ok(())
    }
}

/// Recurrence of a discretionary expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    pub fn occurrences_per_year(&self) -> u32 {
        match self {
            Self::Daily => 365,
            Self::Weekly => 52,
            Self::Monthly => 12,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(format!("Unknown frequency: {}", s)),
        }
    }
}

/// Risk bucket for a projected health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Declining => "declining",
            Self::Stable => "stable",
        }
    }
}

/// One point of a forecast trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub label: String,
    pub score: f64,
}

/// Projected financial health
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub current_score: u8,
    pub predicted_score: u8,
    pub risk_level: RiskLevel,
    pub trend: Trend,
    pub period_months: u32,
    pub trajectory: Vec<TrajectoryPoint>,
}

/// Foregone growth from one recurring discretionary expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityCostEntry {
    pub scenario: String,
    pub unit_cost: f64,
    pub frequency: Frequency,
    pub annual_cost: f64,
    pub alternative: String,
    pub rate: f64,
    pub projected_return: f64,
    pub forgone_growth: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

/// Severity of a crisis alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Risk type that produced a crisis alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertCategory {
    SpendingSpike,
    SavingsDip,
    GoalAtRisk,
    DebtPressure,
}

impl AlertCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SpendingSpike => "spending_spike",
            Self::SavingsDip => "savings_dip",
            Self::GoalAtRisk => "goal_at_risk",
            Self::DebtPressure => "debt_pressure",
        }
    }
}

impl fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A probability-scored financial risk warning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisAlert {
    pub category: AlertCategory,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    /// Likelihood in percent (0-100)
    pub probability: u8,
    pub recommended_actions: Vec<String>,
    /// When the risk is expected to materialize
    pub effective_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emotion_roundtrip_and_order() {
        assert_eq!(
            "Stressed".parse::<EmotionCategory>().unwrap(),
            EmotionCategory::Stressed
        );
        assert!("angry".parse::<EmotionCategory>().is_err());
        assert!(EmotionCategory::Stressed < EmotionCategory::Neutral);
    }

    #[test]
    fn test_frequency_occurrences() {
        assert_eq!(Frequency::Daily.occurrences_per_year(), 365);
        assert_eq!(Frequency::Weekly.occurrences_per_year(), 52);
        assert_eq!(Frequency::Monthly.occurrences_per_year(), 12);
    }

    #[test]
    fn test_profile_ratios() {
        let profile = FinancialProfile {
            income: 65000.0,
            expenses: 45000.0,
            savings: 15000.0,
            debt: 25000.0,
            goals: vec![],
        };
        assert!((profile.emergency_coverage_months().unwrap() - 4.0).abs() < 1e-9);
        assert!(profile.expense_ratio().unwrap() > 0.69);

        let broke = FinancialProfile::default();
        assert!(broke.expense_ratio().is_none());
        assert!(broke.emergency_coverage_months().is_none());
    }

    #[test]
    fn test_profile_validation() {
        let profile = FinancialProfile {
            income: -1.0,
            ..Default::default()
        };
        assert!(profile.validate().is_err());
        assert!(FinancialProfile::default().validate().is_ok());
    }

    #[test]
    fn test_intervention_serializes_type_field() {
        let descriptor = InterventionDescriptor {
            intervention_type: InterventionType::SpendingPause,
            title: "Pause".into(),
            description: "Breathe".into(),
            action: "Wait".into(),
            duration: Some(5),
            amount: None,
        };
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["type"], "spending_pause");
        assert_eq!(json["duration"], 5);
        assert!(json.get("amount").is_none());
    }
}
