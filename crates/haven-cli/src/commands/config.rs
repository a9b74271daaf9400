//! Engine configuration command

use anyhow::Result;

use haven_core::config::default_config_path;
use haven_core::WellnessEngine;

use super::print_json;

pub fn cmd_config(engine: &WellnessEngine, json: bool) -> Result<()> {
    let config = engine.config();
    let user_path = default_config_path();
    let policy_emotions: Vec<&str> = config.interventions.emotions().map(|e| e.as_str()).collect();

    if json {
        return print_json(&serde_json::json!({
            "version": config.version,
            "fingerprint": config.fingerprint,
            "source": config.source.to_string(),
            "user_config_path": user_path.as_ref().map(|p| p.display().to_string()),
            "emotion_categories": config.emotions.len(),
            "trigger_tags": config.triggers.len(),
            "intervention_emotions": policy_emotions,
            "scenarios": config.opportunity.scenarios.len(),
        }));
    }

    println!("⚙️  Engine configuration");
    println!("   Version:     {}", config.version);
    println!("   Fingerprint: {}", config.fingerprint);
    println!("   Source:      {}", config.source);
    match user_path {
        Some(path) if path.exists() => println!("   User config: {}", path.display()),
        Some(path) => println!("   User config: {} (not present)", path.display()),
        None => println!("   User config: (no data directory)"),
    }

    println!();
    println!("   Emotion categories: {}", config.emotions.len());
    println!("   Trigger tags:       {}", config.triggers.len());
    println!("   Interventions for:  {}", policy_emotions.join(", "));
    println!("   Cost scenarios:     {}", config.opportunity.scenarios.len());
    println!(
        "   Forecast:           {} months, delta {}..={}",
        config.forecast.default_months, config.forecast.delta_min, config.forecast.delta_max
    );
    println!(
        "   Default rate:       {:.1}%",
        config.opportunity.default_rate * 100.0
    );

    Ok(())
}
