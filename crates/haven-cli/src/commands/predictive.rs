//! Forecast, crisis alert and opportunity cost commands

use std::path::Path;

use anyhow::Result;

use haven_core::models::{Frequency, Severity};
use haven_core::{RandomDelta, WellnessEngine};

use super::{money, print_json, read_profile};

pub fn cmd_forecast(
    engine: &WellnessEngine,
    profile_path: &Path,
    score: Option<u8>,
    months: Option<u32>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let profile = read_profile(profile_path)?;

    let result = match seed {
        Some(seed) => {
            engine.forecast_health_with(&profile, score, months, &mut RandomDelta::seeded(seed))?
        }
        None => engine.forecast_health(&profile, score, months)?,
    };

    if json {
        return print_json(&result);
    }

    println!("📈 Financial health forecast ({} months)", result.period_months);
    println!("   ─────────────────────────────────");
    println!("   Current score:   {}", result.current_score);
    println!("   Predicted score: {}", result.predicted_score);
    println!("   Risk level:      {}", result.risk_level);
    println!("   Trend:           {}", result.trend.as_str());

    if !result.trajectory.is_empty() {
        println!();
        println!("   Trajectory");
        for point in &result.trajectory {
            println!("   {:<10} {:>6.1}", point.label, point.score);
        }
    }

    Ok(())
}

pub fn cmd_alerts(engine: &WellnessEngine, profile_path: &Path, json: bool) -> Result<()> {
    let profile = read_profile(profile_path)?;
    let alerts = engine.generate_crisis_alerts(&profile)?;

    if json {
        return print_json(&serde_json::json!({
            "alerts": alerts,
            "count": alerts.len(),
        }));
    }

    if alerts.is_empty() {
        println!("✅ No crisis alerts");
        return Ok(());
    }

    println!("⚠️  Crisis alerts ({})", alerts.len());
    println!("   ─────────────────────────────────────────────");

    for alert in &alerts {
        let icon = match alert.severity {
            Severity::High => "🔴",
            Severity::Medium => "🟠",
            Severity::Low => "🟡",
        };
        println!();
        println!(
            "   {} [{}%] {} ({})",
            icon, alert.probability, alert.title, alert.category
        );
        println!("      {}", alert.description);
        println!("      By {}", alert.effective_at.format("%Y-%m-%d"));
        if !alert.recommended_actions.is_empty() {
            println!("      → {}", alert.recommended_actions.join(" · "));
        }
    }

    Ok(())
}

/// Single expense when `amount` is given, otherwise the scenario catalog
pub fn cmd_cost(
    engine: &WellnessEngine,
    amount: Option<f64>,
    frequency: Frequency,
    rate: Option<f64>,
    json: bool,
) -> Result<()> {
    let entries = match amount {
        Some(amount) => vec![engine.opportunity_cost(amount, frequency, rate)?],
        None => engine.opportunity_costs()?,
    };

    let total_annual_cost: f64 = entries.iter().map(|e| e.annual_cost).sum();
    let total_forgone_growth: f64 = entries.iter().map(|e| e.forgone_growth).sum();

    if json {
        return print_json(&serde_json::json!({
            "entries": entries,
            "total_annual_cost": total_annual_cost,
            "total_forgone_growth": total_forgone_growth,
        }));
    }

    println!("💸 Opportunity cost");
    println!("   ─────────────────────────────────────────────");

    for entry in &entries {
        println!();
        println!(
            "   {} ({} {})",
            entry.scenario,
            money(entry.unit_cost),
            entry.frequency
        );
        println!("      Annual cost:    {}", money(entry.annual_cost));
        println!(
            "      If invested:    {} at {:.1}%",
            money(entry.projected_return),
            entry.rate * 100.0
        );
        println!("      Forgone growth: {}", money(entry.forgone_growth));
        if let Some(ref rec) = entry.recommendation {
            println!("      💡 {}", rec);
        }
    }

    if entries.len() > 1 {
        println!();
        println!("   Total annual cost:    {}", money(total_annual_cost));
        println!("   Total forgone growth: {}", money(total_forgone_growth));
    }

    Ok(())
}
