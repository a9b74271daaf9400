//! Intervention policy
//!
//! Maps an emotion to an ordered list of recommended interventions. The table
//! is pure data loaded from config; `neutral` is the fallback for any emotion
//! without entries. Selection never reorders or mutates the table.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::{EmotionCategory, InterventionDescriptor, TriggerTag};

/// Static per-emotion intervention table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterventionPolicy {
    table: BTreeMap<EmotionCategory, Vec<InterventionDescriptor>>,
}

impl InterventionPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to an emotion's list (declaration order is kept)
    pub fn push(&mut self, emotion: EmotionCategory, descriptor: InterventionDescriptor) {
        self.table.entry(emotion).or_default().push(descriptor);
    }

    /// Interventions for an emotion, falling back to the neutral list
    pub fn select(&self, emotion: EmotionCategory) -> &[InterventionDescriptor] {
        self.table
            .get(&emotion)
            .filter(|list| !list.is_empty())
            .or_else(|| self.table.get(&EmotionCategory::Neutral))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Build a response plan: first entry is primary, the rest secondary
    pub fn plan(&self, emotion: EmotionCategory, triggers: &BTreeSet<TriggerTag>) -> ResponsePlan {
        let selected = self.select(emotion);
        ResponsePlan {
            emotion,
            primary: selected.first().cloned(),
            secondary: selected.iter().skip(1).cloned().collect(),
            triggers: triggers.iter().copied().collect(),
        }
    }

    /// Emotions with an explicit entry list
    pub fn emotions(&self) -> impl Iterator<Item = EmotionCategory> + '_ {
        self.table.keys().copied()
    }
}

/// Interventions resolved for one classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsePlan {
    pub emotion: EmotionCategory,
    pub primary: Option<InterventionDescriptor>,
    pub secondary: Vec<InterventionDescriptor>,
    pub triggers: Vec<TriggerTag>,
}
