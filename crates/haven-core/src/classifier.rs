//! Emotion classification for free text
//!
//! Scores the lowercased input against the emotion lexicon and picks a single
//! primary category. Classification is total: empty or keyword-free text
//! resolves to `neutral`.
//!
//! ## Tie-break
//!
//! Among the categories sharing the highest score, the first in declaration
//! order (stressed, excited, sad, neutral) wins, so "stressed but okay" is
//! `stressed`. When nothing matched at all the result is `neutral`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::lexicon::Lexicon;
use crate::models::EmotionCategory;

/// Result of classifying a piece of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub primary: EmotionCategory,
    /// Keyword occurrences per category, in canonical order
    pub scores: BTreeMap<EmotionCategory, usize>,
    /// Primary score as a share of all matches (0.0 when nothing matched)
    pub confidence: f64,
    /// Keywords of the primary category found in the text
    pub matched_keywords: Vec<String>,
}

/// Classify text against an emotion lexicon
pub fn classify(lexicon: &Lexicon<EmotionCategory>, text: &str) -> Classification {
    let lowered = text.to_lowercase();

    let scores: BTreeMap<EmotionCategory, usize> = EmotionCategory::ALL
        .iter()
        .map(|&category| (category, lexicon.count_matches(category, &lowered)))
        .collect();

    let primary = resolve_primary(&scores);
    let total: usize = scores.values().sum();
    let confidence = if total == 0 {
        0.0
    } else {
        scores[&primary] as f64 / total as f64
    };

    let matched_keywords = lexicon
        .matched_keywords(primary, &lowered)
        .map(str::to_string)
        .collect();

    debug!(
        primary = primary.as_str(),
        total_matches = total,
        "Classified text"
    );

    Classification {
        primary,
        scores,
        confidence,
        matched_keywords,
    }
}

/// Pick the primary category from per-category scores
pub fn resolve_primary(scores: &BTreeMap<EmotionCategory, usize>) -> EmotionCategory {
    let best = EmotionCategory::ALL
        .iter()
        .map(|c| scores.get(c).copied().unwrap_or(0))
        .max()
        .unwrap_or(0);

    let tied: Vec<EmotionCategory> = EmotionCategory::ALL
        .iter()
        .copied()
        .filter(|c| scores.get(c).copied().unwrap_or(0) == best)
        .collect();

    if best == 0 {
        return EmotionCategory::Neutral;
    }
    tied.first().copied().unwrap_or(EmotionCategory::Neutral)
}
