//! Haven CLI - Financial wellness decision engine
//!
//! Usage:
//!   haven classify "TEXT"          Classify the emotional state of a message
//!   haven forecast --profile FILE  Project financial health
//!   haven alerts --profile FILE    Show crisis alerts
//!   haven serve --port 3000        Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config_path = commands::resolve_config_path(cli.config.as_deref());
    let config = config_path.as_deref();

    match cli.command {
        Commands::Serve {
            port,
            host,
            no_auth,
        } => commands::cmd_serve(config, &host, port, no_auth).await,
        Commands::Classify { text } => {
            let engine = commands::load_engine(config)?;
            commands::cmd_classify(&engine, &text, cli.json)
        }
        Commands::Triggers {
            text,
            location,
            mood,
            time,
        } => {
            let engine = commands::load_engine(config)?;
            let context = haven_core::models::BehavioralContext {
                location,
                mood,
                time,
            };
            commands::cmd_triggers(&engine, &context, text.as_deref(), cli.json)
        }
        Commands::Interventions { emotion } => {
            let engine = commands::load_engine(config)?;
            commands::cmd_interventions(&engine, &emotion, cli.json)
        }
        Commands::Forecast {
            profile,
            score,
            months,
            seed,
        } => {
            let engine = commands::load_engine(config)?;
            commands::cmd_forecast(&engine, &profile, score, months, seed, cli.json)
        }
        Commands::Alerts { profile } => {
            let engine = commands::load_engine(config)?;
            commands::cmd_alerts(&engine, &profile, cli.json)
        }
        Commands::Cost {
            amount,
            frequency,
            rate,
        } => {
            let engine = commands::load_engine(config)?;
            let frequency: haven_core::models::Frequency = frequency
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;
            commands::cmd_cost(&engine, amount, frequency, rate, cli.json)
        }
        Commands::Config => {
            let engine = commands::load_engine(config)?;
            commands::cmd_config(&engine, cli.json)
        }
    }
}
