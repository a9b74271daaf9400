//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analyze` - Emotion classification, trigger detection, interventions
//! - `config` - Resolved engine configuration
//! - `predictive` - Health forecast, crisis alerts, opportunity costs
//! - `serve` - Web server command

pub mod analyze;
pub mod config;
pub mod predictive;
pub mod serve;

// Re-export command functions for main.rs
pub use analyze::*;
pub use config::*;
pub use predictive::*;
pub use serve::*;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use haven_core::models::FinancialProfile;
use haven_core::WellnessEngine;

/// Environment variable naming an engine config file
pub const CONFIG_ENV: &str = "HAVEN_CONFIG";

/// Pick the config path: --config flag, then HAVEN_CONFIG
pub fn resolve_config_path(flag: Option<&Path>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf).or_else(|| {
        std::env::var(CONFIG_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
    })
}

/// Build the engine from an explicit config path, or the default search
pub fn load_engine(config: Option<&Path>) -> Result<WellnessEngine> {
    WellnessEngine::load(config).with_context(|| match config {
        Some(path) => format!("Failed to load engine config from {}", path.display()),
        None => "Failed to load engine config".to_string(),
    })
}

/// Read a financial profile from a JSON file
pub fn read_profile(path: &Path) -> Result<FinancialProfile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid profile JSON in {}", path.display()))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format a currency amount with two decimals
pub fn money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}
