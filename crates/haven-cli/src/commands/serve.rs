//! Server command implementation

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::warn;

use super::load_engine;

pub async fn cmd_serve(config: Option<&Path>, host: &str, port: u16, no_auth: bool) -> Result<()> {
    println!("🚀 Starting Haven web server...");
    if let Some(path) = config {
        println!("   Config: {}", path.display());
    }
    println!("   Listening: http://{}:{}", host, port);

    // Parse API keys from environment (comma-separated)
    let api_keys =
        haven_server::parse_api_keys(&std::env::var("HAVEN_API_KEYS").unwrap_or_default());

    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
    } else if api_keys.is_empty() {
        println!("   🔒 Authentication: no API keys configured (set HAVEN_API_KEYS)");
    } else {
        println!(
            "   🔑 API keys: {} configured (HAVEN_API_KEYS)",
            api_keys.len()
        );
    }

    // A broken config still serves /api/health; engine routes answer 503
    let engine = match load_engine(config) {
        Ok(engine) => {
            println!("   Engine config: {} ({})", engine.version(), engine.fingerprint());
            Some(Arc::new(engine))
        }
        Err(e) => {
            warn!(error = %format!("{:#}", e), "Wellness engine failed to initialize");
            println!("   ⚠️  Engine unavailable: {:#}", e);
            None
        }
    };

    println!();
    println!("   Press Ctrl+C to stop");

    let server_config = haven_server::ServerConfig {
        require_auth: !no_auth,
        allowed_origins: vec![],
        api_keys,
    };

    haven_server::serve_with_config(engine, host, port, server_config).await?;

    Ok(())
}
