//! Behavioral planners: spending pauses, habit stacks, life-event savings plans

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Pause length when the caller does not ask for one
pub const DEFAULT_PAUSE_SECS: u32 = 5;
pub const MIN_PAUSE_SECS: u32 = 3;
pub const MAX_PAUSE_SECS: u32 = 300;

/// A timed pause before a purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingPause {
    pub trigger_type: String,
    pub duration_secs: u32,
    pub message: String,
    pub steps: Vec<String>,
}

/// Build a spending pause for a trigger, clamping the duration to a sane window
pub fn spending_pause(trigger_type: &str, duration_secs: Option<u32>) -> SpendingPause {
    let trigger_type = trigger_type.trim().to_lowercase();
    let duration_secs = duration_secs
        .unwrap_or(DEFAULT_PAUSE_SECS)
        .clamp(MIN_PAUSE_SECS, MAX_PAUSE_SECS);

    let (message, steps): (&str, Vec<&str>) = match trigger_type.as_str() {
        t if t.contains("stress") => (
            "Take 5 deep breaths before making any purchase",
            vec![
                "Breathe in for 4 seconds, out for 6",
                "Name what is causing the stress",
                "Ask whether this purchase will still matter tomorrow",
            ],
        ),
        t if t.contains("bored") => (
            "Pause and pick something free to do instead",
            vec![
                "Step away from the screen or store",
                "Try a short walk or call a friend",
                "Come back to the cart in a day if you still want it",
            ],
        ),
        t if t.contains("celebrat") => (
            "Celebrate by moving part of this money toward a goal",
            vec![
                "Decide what you are celebrating",
                "Set aside a share for savings first",
                "Spend only what is left",
            ],
        ),
        _ => (
            "Take 5 deep breaths before making any purchase",
            vec![
                "Breathe slowly until the timer ends",
                "Check the purchase against your budget",
            ],
        ),
    };

    SpendingPause {
        trigger_type,
        duration_secs,
        message: message.to_string(),
        steps: steps.into_iter().map(String::from).collect(),
    }
}

/// A financial action attached to an existing daily habit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitStack {
    pub existing_habit: String,
    pub new_habit: String,
    pub suggested_time: String,
}

/// Pair existing habits with financial actions in order
///
/// Extra habits cycle back through the goals; with no goals there is nothing
/// to stack.
pub fn habit_stacks(existing: &[String], goals: &[String]) -> Vec<HabitStack> {
    if goals.is_empty() {
        return Vec::new();
    }

    existing
        .iter()
        .zip(goals.iter().cycle())
        .map(|(habit, goal)| HabitStack {
            existing_habit: habit.clone(),
            new_habit: goal.clone(),
            suggested_time: suggested_time(habit).to_string(),
        })
        .collect()
}

fn suggested_time(habit: &str) -> &'static str {
    let habit = habit.to_lowercase();
    if habit.contains("morning") || habit.contains("breakfast") {
        "7:00 AM"
    } else if habit.contains("lunch") || habit.contains("noon") {
        "12:00 PM"
    } else if habit.contains("evening") || habit.contains("dinner") || habit.contains("night") {
        "8:00 PM"
    } else {
        "Anytime"
    }
}

/// Size of a life event relative to typical savings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Minor,
    Medium,
    Major,
}

impl Impact {
    pub fn from_cost(cost: f64) -> Self {
        if cost >= 25000.0 {
            Self::Major
        } else if cost >= 5000.0 {
            Self::Medium
        } else {
            Self::Minor
        }
    }
}

/// An anticipated life event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeEvent {
    #[serde(alias = "event")]
    pub name: String,
    #[serde(alias = "estimatedCost")]
    pub estimated_cost: f64,
    /// Amount to save up front (defaults to the full cost)
    #[serde(default, alias = "savingsTarget")]
    pub savings_target: Option<f64>,
    #[serde(alias = "monthsUntil")]
    pub months_until: u32,
    #[serde(default)]
    pub probability: Option<u8>,
}

/// Monthly savings plan for one life event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeEventPlan {
    pub name: String,
    pub estimated_cost: f64,
    pub savings_target: f64,
    pub months_until: u32,
    pub monthly_savings: u64,
    pub impact: Impact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<u8>,
}

pub fn plan_life_event(event: &LifeEvent) -> Result<LifeEventPlan> {
    if event.months_until == 0 {
        return Err(Error::validation(format!(
            "life event '{}' needs at least one month of lead time",
            event.name
        )));
    }
    if !event.estimated_cost.is_finite() || event.estimated_cost < 0.0 {
        return Err(Error::validation(format!(
            "life event '{}' has an invalid estimated cost",
            event.name
        )));
    }
    if event.probability.is_some_and(|p| p > 100) {
        return Err(Error::validation("probability must be between 0 and 100"));
    }

    let savings_target = event.savings_target.unwrap_or(event.estimated_cost);
    if !savings_target.is_finite() || savings_target < 0.0 {
        return Err(Error::validation(format!(
            "life event '{}' has an invalid savings target",
            event.name
        )));
    }

    Ok(LifeEventPlan {
        name: event.name.clone(),
        estimated_cost: event.estimated_cost,
        savings_target,
        months_until: event.months_until,
        monthly_savings: (savings_target / event.months_until as f64).round() as u64,
        impact: Impact::from_cost(event.estimated_cost),
        probability: event.probability,
    })
}
