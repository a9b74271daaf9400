//! Emotion and trigger commands

use anyhow::Result;

use haven_core::models::{BehavioralContext, EmotionCategory, InterventionDescriptor};
use haven_core::WellnessEngine;

use super::print_json;

pub fn cmd_classify(engine: &WellnessEngine, text: &str, json: bool) -> Result<()> {
    let analysis = engine.analyze_emotion(text);
    if json {
        return print_json(&analysis);
    }

    let c = &analysis.classification;
    println!("🧠 Emotional state: {}", c.primary);
    println!("   Confidence: {:.0}%", c.confidence * 100.0);
    if !c.matched_keywords.is_empty() {
        println!("   Keywords:   {}", c.matched_keywords.join(", "));
    }

    println!();
    println!("   Scores");
    for (category, score) in &c.scores {
        println!("   {:<10} {}", category.as_str(), score);
    }

    if !analysis.triggers.is_empty() {
        let tags: Vec<&str> = analysis.triggers.iter().map(|t| t.as_str()).collect();
        println!();
        println!("   ⚡ Triggers: {}", tags.join(", "));
    }

    print_plan(analysis.plan.primary.as_ref(), &analysis.plan.secondary);
    Ok(())
}

pub fn cmd_triggers(
    engine: &WellnessEngine,
    context: &BehavioralContext,
    text: Option<&str>,
    json: bool,
) -> Result<()> {
    let triggers = engine.detect_triggers(context, text);
    if json {
        return print_json(&serde_json::json!({
            "triggers": triggers,
            "intervention_recommended": !triggers.is_empty(),
        }));
    }

    if triggers.is_empty() {
        println!("✅ No spending triggers detected");
        return Ok(());
    }

    println!("⚡ Spending triggers ({})", triggers.len());
    println!("   ─────────────────────────────────");
    for trigger in &triggers {
        println!("   • {}", trigger);
    }
    println!();
    println!("   An intervention is recommended before spending.");
    Ok(())
}

pub fn cmd_interventions(engine: &WellnessEngine, emotion: &str, json: bool) -> Result<()> {
    let category = emotion.parse::<EmotionCategory>().unwrap_or_else(|e| {
        tracing::warn!("{}, using neutral", e);
        EmotionCategory::Neutral
    });
    let selected = engine.select_interventions(category);

    if json {
        return print_json(&serde_json::json!({
            "emotional_state": category,
            "primary_intervention": selected.first(),
            "secondary_interventions": selected.iter().skip(1).collect::<Vec<_>>(),
        }));
    }

    println!("🧭 Interventions for '{}'", category);
    print_plan(selected.first(), selected.get(1..).unwrap_or_default());
    Ok(())
}

fn print_plan(primary: Option<&InterventionDescriptor>, secondary: &[InterventionDescriptor]) {
    let Some(primary) = primary else {
        println!();
        println!("   No interventions configured");
        return;
    };

    println!();
    println!("   Recommended: {}", primary.title);
    println!("      {}", primary.description);
    println!("      → {}", primary.action);

    if !secondary.is_empty() {
        println!();
        println!("   Also consider:");
        for item in secondary {
            println!("   • {} ({})", item.title, item.intervention_type.as_str());
        }
    }
}
