//! Spending trigger detection
//!
//! Two independent detectors:
//! - Free text: a trigger fires when any of its keywords is a substring of
//!   the lowercased text
//! - Behavioral context: three fixed predicates over location, mood and
//!   time of day

use std::collections::BTreeSet;

use tracing::debug;

use crate::lexicon::Lexicon;
use crate::models::{BehavioralContext, TriggerTag};

/// Location value that fires the `location` trigger
pub const SHOPPING_LOCATION: &str = "shopping_mall";

/// Mood value that fires the `stress` trigger
pub const STRESSED_MOOD: &str = "stressed";

/// Time-of-day value that fires the `time_of_day` trigger
pub const EVENING: &str = "evening";

/// Detect triggers mentioned in free text
pub fn detect_text_triggers(lexicon: &Lexicon<TriggerTag>, text: &str) -> BTreeSet<TriggerTag> {
    let lowered = text.to_lowercase();
    let found: BTreeSet<TriggerTag> = lexicon
        .entries()
        .filter(|(tag, _)| lexicon.any_match(*tag, &lowered))
        .map(|(tag, _)| tag)
        .collect();

    debug!(count = found.len(), "Text trigger detection complete");
    found
}

/// Detect triggers from structured behavioral context
///
/// Missing fields never match.
pub fn detect_behavioral_triggers(context: &BehavioralContext) -> BTreeSet<TriggerTag> {
    let mut found = BTreeSet::new();

    if context.location.as_deref() == Some(SHOPPING_LOCATION) {
        found.insert(TriggerTag::Location);
    }
    if context.mood.as_deref() == Some(STRESSED_MOOD) {
        found.insert(TriggerTag::Stress);
    }
    if context.time.as_deref() == Some(EVENING) {
        found.insert(TriggerTag::TimeOfDay);
    }

    found
}
