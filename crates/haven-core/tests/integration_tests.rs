//! Integration tests for haven-core
//!
//! These tests exercise the classify → trigger → intervene workflow, the
//! predictive operations over a realistic profile, config overrides, and
//! concurrent use of a shared engine.

use std::collections::BTreeSet;
use std::io::Write;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use haven_core::{
    models::{
        AlertCategory, BehavioralContext, EmotionCategory, FinancialProfile, Frequency, Goal,
        RiskLevel, Severity, TriggerTag,
    },
    ConfigSource, EngineConfig, FixedDelta, RandomDelta, WellnessEngine,
};

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

// =============================================================================
// Emotional workflow
// =============================================================================

#[test]
fn test_single_category_text_classifies_to_that_category() {
    let engine = WellnessEngine::new().unwrap();
    let cases = [
        ("I feel anxious and overwhelmed", EmotionCategory::Stressed),
        ("Got a promotion, I'm thrilled", EmotionCategory::Excited),
        ("Feeling lonely and sad tonight", EmotionCategory::Sad),
        ("Everything is fine, pretty normal", EmotionCategory::Neutral),
    ];

    for (text, expected) in cases {
        assert_eq!(
            engine.classify_emotion(text).primary,
            expected,
            "text: {}",
            text
        );
    }
}

#[test]
fn test_keyword_free_text_is_neutral() {
    let engine = WellnessEngine::new().unwrap();
    for text in ["", "   ", "the quick brown fox", "12345"] {
        let result = engine.classify_emotion(text);
        assert_eq!(result.primary, EmotionCategory::Neutral);
        assert_eq!(result.confidence, 0.0);
    }
}

#[test]
fn test_tie_with_neutral_keyword_keeps_declaration_order() {
    let engine = WellnessEngine::new().unwrap();
    let result = engine.classify_emotion("I'm stressed but okay");
    assert_eq!(result.scores[&EmotionCategory::Stressed], 1);
    assert_eq!(result.scores[&EmotionCategory::Neutral], 1);
    assert_eq!(result.primary, EmotionCategory::Stressed);
}

#[test]
fn test_intervention_selection_is_stable() {
    let engine = WellnessEngine::new().unwrap();
    for emotion in EmotionCategory::ALL {
        let first = engine.select_interventions(emotion).to_vec();
        let second = engine.select_interventions(emotion).to_vec();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }
}

#[test]
fn test_demo_trigger_context() {
    let engine = WellnessEngine::new().unwrap();
    let context = BehavioralContext {
        location: Some("shopping_mall".into()),
        mood: Some("stressed".into()),
        time: Some("evening".into()),
    };
    let found = engine.detect_behavioral_triggers(&context);
    assert_eq!(
        found,
        BTreeSet::from([TriggerTag::Location, TriggerTag::TimeOfDay, TriggerTag::Stress])
    );

    let none = engine.detect_behavioral_triggers(&BehavioralContext::default());
    assert!(none.is_empty());
}

// =============================================================================
// Predictive workflow
// =============================================================================

#[test]
fn test_forecast_bounds_for_72() {
    let engine = WellnessEngine::new().unwrap();
    for seed in 0..100u64 {
        let mut source = RandomDelta::seeded(seed);
        let result = engine
            .forecast_health_with(&demo_profile(), Some(72), Some(6), &mut source)
            .unwrap();
        assert!((77..=87).contains(&result.predicted_score));
        let expected_risk = if result.predicted_score < 80 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };
        assert_eq!(result.risk_level, expected_risk);
    }
}

#[test]
fn test_forecast_clamps_at_100() {
    let engine = WellnessEngine::new().unwrap();
    let result = engine
        .forecast_health_with(&demo_profile(), Some(99), Some(3), &mut FixedDelta(15))
        .unwrap();
    assert_eq!(result.predicted_score, 100);
    assert_eq!(result.trajectory.last().unwrap().score, 100.0);
}

#[test]
fn test_demo_profile_alerts() {
    let engine = WellnessEngine::new().unwrap();
    let now = Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap();
    let alerts = engine.generate_crisis_alerts_at(&demo_profile(), now).unwrap();

    // spike + dip + three goals + debt
    assert_eq!(alerts.len(), 6);
    assert_eq!(alerts[0].category, AlertCategory::SpendingSpike);
    assert_eq!(alerts[0].severity, Severity::High);
    assert_eq!(alerts[0].probability, 85);

    for pair in alerts.windows(2) {
        let key = |a: &haven_core::models::CrisisAlert| (a.severity.priority(), a.probability);
        assert!(key(&pair[0]) >= key(&pair[1]));
    }
    assert!(alerts.iter().all(|a| a.effective_at > now));
}

#[test]
fn test_opportunity_cost_reference_values() {
    let engine = WellnessEngine::new().unwrap();
    let coffee = engine.opportunity_cost(5.0, Frequency::Daily, Some(0.6)).unwrap();
    assert_eq!(coffee.annual_cost, 1825.0);
    let shopping = engine.opportunity_cost(50.0, Frequency::Weekly, Some(0.0)).unwrap();
    assert_eq!(shopping.annual_cost, 2600.0);
    assert_eq!(shopping.forgone_growth, 0.0);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_engine_from_override_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[engine]
version = "custom"

[[interventions]]
emotion = "neutral"
type = "budget_review"
title = "Only option"
description = "The one entry"
action = "Review"

[alerts]
expense_ratio_threshold = 0.95
"#
    )
    .unwrap();

    let engine = WellnessEngine::load(Some(file.path())).unwrap();
    assert_eq!(engine.version(), "custom");
    assert_eq!(
        engine.config().source,
        ConfigSource::File(file.path().to_path_buf())
    );

    // Every emotion falls back to the single neutral entry
    for emotion in EmotionCategory::ALL {
        let selected = engine.select_interventions(emotion);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].title, "Only option");
    }

    let alerts = engine.generate_crisis_alerts(&demo_profile()).unwrap();
    assert!(alerts
        .iter()
        .all(|a| a.category != AlertCategory::SpendingSpike));
}

#[test]
fn test_fingerprint_identifies_config() {
    let a = EngineConfig::embedded().unwrap();
    let b = EngineConfig::embedded().unwrap();
    let c = EngineConfig::from_toml("[engine]\nversion = \"other\"\n").unwrap();
    assert_eq!(a.fingerprint, b.fingerprint);
    assert_ne!(a.fingerprint, c.fingerprint);
}

// =============================================================================
// Concurrency
// =============================================================================

const WORDS: &[&str] = &[
    "stressed", "happy", "sad", "fine", "buy", "bonus", "bored", "deadline", "lonely", "cart",
    "party", "the", "and", "money", "okay", "panic", "relax", "coffee",
];

fn random_text(rng: &mut StdRng) -> String {
    let len = rng.gen_range(0..12);
    (0..len)
        .map(|_| WORDS[rng.gen_range(0..WORDS.len())])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run `f` over `inputs` on scoped threads, preserving input order
fn run_parallel<T, R, F>(inputs: &[T], f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .chunks(25)
            .map(|chunk| {
                let f = &f;
                scope.spawn(move || chunk.iter().map(f).collect::<Vec<_>>())
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    })
}

fn random_profile(rng: &mut StdRng) -> FinancialProfile {
    let goals = (0..rng.gen_range(0..4))
        .map(|i| Goal {
            name: format!("Goal {}", i),
            target: rng.gen_range(1000.0..60000.0),
            current: rng.gen_range(0.0..30000.0),
        })
        .collect();

    FinancialProfile {
        income: rng.gen_range(0.0..150000.0),
        expenses: rng.gen_range(0.0..120000.0),
        savings: rng.gen_range(0.0..80000.0),
        debt: rng.gen_range(0.0..100000.0),
        goals,
    }
}

fn random_context(rng: &mut StdRng) -> BehavioralContext {
    const LOCATIONS: &[&str] = &["shopping_mall", "home", "office"];
    const MOODS: &[&str] = &["stressed", "calm", "happy"];
    const TIMES: &[&str] = &["evening", "morning", "afternoon"];

    let mut pick = |options: &[&str]| {
        rng.gen_bool(0.7)
            .then(|| options[rng.gen_range(0..options.len())].to_string())
    };

    BehavioralContext {
        location: pick(LOCATIONS),
        mood: pick(MOODS),
        time: pick(TIMES),
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let engine = Arc::new(WellnessEngine::new().unwrap());
    let mut rng = StdRng::seed_from_u64(42);
    let inputs: Vec<String> = (0..200).map(|_| random_text(&mut rng)).collect();

    let analyze = |text: &String| engine.analyze_emotion(text);
    let sequential: Vec<_> = inputs.iter().map(analyze).collect();
    assert_eq!(sequential, run_parallel(&inputs, analyze));
}

#[test]
fn test_parallel_trigger_detection_matches_sequential() {
    let engine = WellnessEngine::new().unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let inputs: Vec<(BehavioralContext, String)> = (0..200)
        .map(|_| (random_context(&mut rng), random_text(&mut rng)))
        .collect();

    let detect = |(context, text): &(BehavioralContext, String)| {
        engine.detect_triggers(context, Some(text.as_str()))
    };
    let sequential: Vec<_> = inputs.iter().map(detect).collect();
    assert_eq!(sequential, run_parallel(&inputs, detect));
}

#[test]
fn test_parallel_forecast_matches_sequential() {
    let engine = WellnessEngine::new().unwrap();
    let mut rng = StdRng::seed_from_u64(99);
    let inputs: Vec<(FinancialProfile, Option<u8>, u32, u64)> = (0..200)
        .map(|_| {
            let score = rng.gen_bool(0.5).then(|| rng.gen_range(0..=100));
            (
                random_profile(&mut rng),
                score,
                rng.gen_range(1..=24),
                rng.gen(),
            )
        })
        .collect();

    let forecast = |(profile, score, months, seed): &(FinancialProfile, Option<u8>, u32, u64)| {
        engine
            .forecast_health_with(profile, *score, Some(*months), &mut RandomDelta::seeded(*seed))
            .unwrap()
    };
    let sequential: Vec<_> = inputs.iter().map(forecast).collect();
    assert_eq!(sequential, run_parallel(&inputs, forecast));
}

#[test]
fn test_parallel_opportunity_cost_matches_sequential() {
    let engine = WellnessEngine::new().unwrap();
    let mut rng = StdRng::seed_from_u64(1234);
    let frequencies = [Frequency::Daily, Frequency::Weekly, Frequency::Monthly];
    let inputs: Vec<(f64, Frequency, f64)> = (0..200)
        .map(|_| {
            (
                rng.gen_range(0.0..500.0),
                frequencies[rng.gen_range(0..frequencies.len())],
                rng.gen_range(-0.5..1.0),
            )
        })
        .collect();

    let cost = |(unit, frequency, rate): &(f64, Frequency, f64)| {
        engine.opportunity_cost(*unit, *frequency, Some(*rate)).unwrap()
    };
    let sequential: Vec<_> = inputs.iter().map(cost).collect();
    assert_eq!(sequential, run_parallel(&inputs, cost));
}

#[test]
fn test_parallel_crisis_alerts_match_sequential() {
    let engine = WellnessEngine::new().unwrap();
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);
    let inputs: Vec<FinancialProfile> = (0..200).map(|_| random_profile(&mut rng)).collect();

    let alerts = |profile: &FinancialProfile| engine.generate_crisis_alerts_at(profile, now).unwrap();
    let sequential: Vec<_> = inputs.iter().map(alerts).collect();
    assert!(sequential.iter().any(|a| !a.is_empty()));
    assert_eq!(sequential, run_parallel(&inputs, alerts));
}
