//! Financial health forecasting
//!
//! Projects a 0-100 health score forward by a bounded adjustment drawn from a
//! [`DeltaSource`], buckets the result into a risk level, and interpolates a
//! month-by-month trajectory.
//!
//! Production callers draw from entropy; tests and reproducible callers pass
//! a seeded [`RandomDelta`] or a [`FixedDelta`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{FinancialProfile, ForecastResult, RiskLevel, TrajectoryPoint, Trend};

/// Longest forecast horizon accepted
pub const MAX_FORECAST_MONTHS: u32 = 120;

/// Source of the projected score adjustment
pub trait DeltaSource {
    /// Draw an adjustment in the inclusive range `min..=max`
    fn draw(&mut self, min: i32, max: i32) -> i32;
}

/// Adjustment drawn uniformly from a random generator
pub struct RandomDelta<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomDelta<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomDelta<StdRng> {
    /// Reproducible source for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> DeltaSource for RandomDelta<R> {
    fn draw(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }
}

/// Always returns the same adjustment, clamped into the requested range
#[derive(Debug, Clone, Copy)]
pub struct FixedDelta(pub i32);

impl DeltaSource for FixedDelta {
    fn draw(&mut self, min: i32, max: i32) -> i32 {
        self.0.clamp(min, max.max(min))
    }
}

/// Score band mapping to a risk level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskBand {
    /// Scores strictly below this value fall in the band
    pub below: u8,
    pub level: RiskLevel,
}

/// Relative weights of the composite health score components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthWeights {
    pub savings_rate: f64,
    pub emergency_fund: f64,
    pub debt: f64,
    pub goals: f64,
}

impl Default for HealthWeights {
    fn default() -> Self {
        Self {
            savings_rate: 0.30,
            emergency_fund: 0.25,
            debt: 0.25,
            goals: 0.20,
        }
    }
}

impl HealthWeights {
    /// Scale weights so they sum to 1.0 (unchanged if the sum is not positive)
    pub fn normalized(self) -> Self {
        let sum = self.savings_rate + self.emergency_fund + self.debt + self.goals;
        if sum <= 0.0 || !sum.is_finite() {
            return self;
        }
        Self {
            savings_rate: self.savings_rate / sum,
            emergency_fund: self.emergency_fund / sum,
            debt: self.debt / sum,
            goals: self.goals / sum,
        }
    }
}

/// Forecast estimator configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastConfig {
    pub delta_min: i32,
    pub delta_max: i32,
    pub default_months: u32,
    /// Checked in order; first band whose `below` exceeds the score wins
    pub risk_bands: Vec<RiskBand>,
    pub default_risk: RiskLevel,
    pub health_weights: HealthWeights,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            delta_min: 5,
            delta_max: 15,
            default_months: 6,
            risk_bands: vec![RiskBand {
                below: 80,
                level: RiskLevel::Medium,
            }],
            default_risk: RiskLevel::Low,
            health_weights: HealthWeights::default(),
        }
    }
}

impl ForecastConfig {
    /// Risk level for a score
    pub fn risk_level(&self, score: u8) -> RiskLevel {
        self.risk_bands
            .iter()
            .find(|band| score < band.below)
            .map(|band| band.level)
            .unwrap_or(self.default_risk)
    }
}

/// Projects health scores under a given configuration
pub struct ForecastEstimator<'a> {
    config: &'a ForecastConfig,
}

impl<'a> ForecastEstimator<'a> {
    pub fn new(config: &'a ForecastConfig) -> Self {
        Self { config }
    }

    /// Forecast `months` ahead from `current_score`
    pub fn forecast(
        &self,
        current_score: u8,
        months: u32,
        source: &mut dyn DeltaSource,
    ) -> Result<ForecastResult> {
        if current_score > 100 {
            return Err(Error::validation("current score must be between 0 and 100"));
        }
        if months == 0 || months > MAX_FORECAST_MONTHS {
            return Err(Error::validation(format!(
                "forecast period must be between 1 and {} months",
                MAX_FORECAST_MONTHS
            )));
        }

        let delta = source.draw(self.config.delta_min, self.config.delta_max);
        let predicted = (current_score as i32 + delta).clamp(0, 100) as u8;

        let trend = match predicted.cmp(&current_score) {
            std::cmp::Ordering::Greater => Trend::Improving,
            std::cmp::Ordering::Less => Trend::Declining,
            std::cmp::Ordering::Equal => Trend::Stable,
        };

        let trajectory = interpolate(current_score, predicted, months);

        debug!(
            current = current_score,
            predicted,
            delta,
            months,
            "Forecast computed"
        );

        Ok(ForecastResult {
            current_score,
            predicted_score: predicted,
            risk_level: self.config.risk_level(predicted),
            trend,
            period_months: months,
            trajectory,
        })
    }

    /// Composite 0-100 health score derived from a profile
    pub fn health_score(&self, profile: &FinancialProfile) -> u8 {
        health_score(profile, &self.config.health_weights)
    }
}

/// Linear month-by-month path from `from` to `to`, ending exactly at `to`
fn interpolate(from: u8, to: u8, months: u32) -> Vec<TrajectoryPoint> {
    let step = (to as f64 - from as f64) / months as f64;
    (1..=months)
        .map(|month| {
            let score = if month == months {
                to as f64
            } else {
                round_tenth(from as f64 + step * month as f64)
            };
            TrajectoryPoint {
                label: format!("Month {}", month),
                score,
            }
        })
        .collect()
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Composite health score from savings rate, emergency fund coverage,
/// debt load and goal progress
pub fn health_score(profile: &FinancialProfile, weights: &HealthWeights) -> u8 {
    let weights = weights.normalized();

    // 20% savings rate earns full marks
    let savings = profile
        .savings_rate()
        .map(|rate| (rate / 0.20).clamp(0.0, 1.0))
        .unwrap_or(0.0);

    // Six months of expenses earns full marks
    let emergency = profile
        .emergency_coverage_months()
        .map(|months| (months / 6.0).clamp(0.0, 1.0))
        .unwrap_or(1.0);

    // Debt at or above 80% of income scores zero
    let debt = match profile.debt_to_income() {
        Some(dti) => 1.0 - (dti / 0.80).clamp(0.0, 1.0),
        None if profile.debt > 0.0 => 0.0,
        None => 1.0,
    };

    let goals = if profile.goals.is_empty() {
        0.5
    } else {
        profile.goals.iter().map(|g| g.progress()).sum::<f64>() / profile.goals.len() as f64
    };

    let score = 100.0
        * (weights.savings_rate * savings
            + weights.emergency_fund * emergency
            + weights.debt * debt
            + weights.goals * goals);

    score.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Goal;
    use proptest::prelude::*;

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
            ],
        }
    }

    #[test]
    fn test_forecast_within_delta_bounds() {
        let config = ForecastConfig::default();
        let estimator = ForecastEstimator::new(&config);
        for seed in 0..50 {
            let result = estimator
                .forecast(72, 6, &mut RandomDelta::seeded(seed))
                .unwrap();
            assert!((77..=87).contains(&result.predicted_score));
            assert_eq!(result.trend, Trend::Improving);
            assert_eq!(result.trajectory.len(), 6);
        }
    }

    #[test]
    fn test_forecast_seed_is_reproducible() {
        let config = ForecastConfig::default();
        let estimator = ForecastEstimator::new(&config);
        let a = estimator.forecast(60, 12, &mut RandomDelta::seeded(7)).unwrap();
        let b = estimator.forecast(60, 12, &mut RandomDelta::seeded(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_forecast_clamps_at_100() {
        let config = ForecastConfig::default();
        let estimator = ForecastEstimator::new(&config);
        let result = estimator.forecast(99, 3, &mut FixedDelta(15)).unwrap();
        assert_eq!(result.predicted_score, 100);
        assert_eq!(result.trajectory.last().unwrap().score, 100.0);
        assert_eq!(result.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_risk_level_threshold() {
        let config = ForecastConfig::default();
        assert_eq!(config.risk_level(79), RiskLevel::Medium);
        assert_eq!(config.risk_level(80), RiskLevel::Low);

        let banded = ForecastConfig {
            risk_bands: vec![
                RiskBand {
                    below: 50,
                    level: RiskLevel::High,
                },
                RiskBand {
                    below: 80,
                    level: RiskLevel::Medium,
                },
            ],
            ..Default::default()
        };
        assert_eq!(banded.risk_level(30), RiskLevel::High);
        assert_eq!(banded.risk_level(65), RiskLevel::Medium);
    }

    #[test]
    fn test_trajectory_is_monotonic() {
        let config = ForecastConfig::default();
        let estimator = ForecastEstimator::new(&config);
        let result = estimator.forecast(40, 24, &mut FixedDelta(11)).unwrap();
        assert_eq!(result.predicted_score, 51);
        for pair in result.trajectory.windows(2) {
            assert!(pair[1].score >= pair[0].score);
        }
        assert_eq!(result.trajectory[0].label, "Month 1");
        assert_eq!(result.trajectory[23].score, 51.0);
    }

    #[test]
    fn test_negative_delta_declines() {
        let config = ForecastConfig {
            delta_min: -10,
            delta_max: -10,
            ..Default::default()
        };
        let estimator = ForecastEstimator::new(&config);
        let result = estimator.forecast(5, 2, &mut RandomDelta::seeded(1)).unwrap();
        assert_eq!(result.predicted_score, 0);
        assert_eq!(result.trend, Trend::Declining);
    }

    #[test]
    fn test_forecast_rejects_bad_period() {
        let config = ForecastConfig::default();
        let estimator = ForecastEstimator::new(&config);
        assert!(estimator.forecast(50, 0, &mut FixedDelta(5)).is_err());
        assert!(estimator.forecast(101, 6, &mut FixedDelta(5)).is_err());
    }

    #[test]
    fn test_health_score_demo_profile() {
        let score = health_score(&demo_profile(), &HealthWeights::default());
        assert!((50..=80).contains(&score), "score was {}", score);
    }

    #[test]
    fn test_health_score_extremes() {
        let strong = FinancialProfile {
            income: 100000.0,
            expenses: 50000.0,
            savings: 50000.0,
            debt: 0.0,
            goals: vec![Goal {
                name: "Done".into(),
                target: 1000.0,
                current: 1000.0,
            }],
        };
        assert_eq!(health_score(&strong, &HealthWeights::default()), 100);

        let weak = FinancialProfile {
            income: 0.0,
            expenses: 30000.0,
            savings: 0.0,
            debt: 10000.0,
            goals: vec![Goal {
                name: "Nothing yet".into(),
                target: 1000.0,
                current: 0.0,
            }],
        };
        assert_eq!(health_score(&weak, &HealthWeights::default()), 0);
    }

    proptest! {
        #[test]
        fn prop_predicted_score_stays_in_range(current in 0u8..=100, seed in any::<u64>(), months in 1u32..=36) {
            let config = ForecastConfig::default();
            let estimator = ForecastEstimator::new(&config);
            let result = estimator.forecast(current, months, &mut RandomDelta::seeded(seed)).unwrap();
            prop_assert!(result.predicted_score <= 100);
            prop_assert!(result.predicted_score >= current);
            prop_assert_eq!(result.trajectory.len() as u32, months);
        }
    }
}
