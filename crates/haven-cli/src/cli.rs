//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Haven - Emotional spending insights and financial health projections
#[derive(Parser)]
#[command(name = "haven")]
#[command(about = "Financial wellness decision engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Engine config file (defaults to HAVEN_CONFIG, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// By default, the server requires an API key from HAVEN_API_KEYS.
        #[arg(long)]
        no_auth: bool,
    },

    /// Classify the emotional state of a message
    Classify {
        /// Text to classify
        text: String,
    },

    /// Detect spending triggers from text and/or behavioral context
    Triggers {
        /// Free text to scan
        #[arg(long)]
        text: Option<String>,

        /// Current location (e.g. shopping_mall)
        #[arg(long)]
        location: Option<String>,

        /// Current mood (e.g. stressed)
        #[arg(long)]
        mood: Option<String>,

        /// Time of day (e.g. evening)
        #[arg(long)]
        time: Option<String>,
    },

    /// List recommended interventions for an emotion
    Interventions {
        /// stressed, excited, sad or neutral
        emotion: String,
    },

    /// Forecast financial health from a profile
    Forecast {
        /// JSON file with income, expenses, savings, debt and goals
        #[arg(long)]
        profile: PathBuf,

        /// Current health score (derived from the profile if omitted)
        #[arg(long)]
        score: Option<u8>,

        /// Forecast horizon in months
        #[arg(long)]
        months: Option<u32>,

        /// Seed for a reproducible projection
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show crisis alerts for a profile
    Alerts {
        /// JSON file with income, expenses, savings, debt and goals
        #[arg(long)]
        profile: PathBuf,
    },

    /// Opportunity cost of a recurring expense (or the built-in scenarios)
    Cost {
        /// Cost per occurrence
        #[arg(long)]
        amount: Option<f64>,

        /// daily, weekly or monthly
        #[arg(long, default_value = "daily")]
        frequency: String,

        /// Annual rate of return (defaults to the configured rate)
        #[arg(long, allow_hyphen_values = true)]
        rate: Option<f64>,
    },

    /// Show the resolved engine configuration
    Config,
}
