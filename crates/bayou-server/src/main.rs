//! Server binary for Cyber Bayou.
//!
//! Wires the launch content, the reward/state engine, and the HTTP API
//! together and serves until `Ctrl-C` or `SIGTERM`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `bayou-config.yaml` (or `BAYOU_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build and validate the launch content
//! 4. Create the engine and register the demo player
//! 5. Serve the HTTP API

mod error;

use std::path::PathBuf;
use std::sync::Arc;

use bayou_api::AppState;
use bayou_core::{BayouConfig, CannedOracle, Engine, InMemorySessionStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::ServerError;

/// Default config file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "bayou-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if any initialization step or the server fails.
#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // 1. Load configuration. Logging is not up yet, so remember where it
    //    came from and report after step 2.
    let (config, source) = load_config()?;

    // 2. Initialize structured logging. RUST_LOG wins over the config.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("bayou-server starting");
    info!(
        source = %source,
        venue_reward_per_tier = config.economy.venue_reward_per_tier,
        hidden_cache_reward = config.economy.hidden_cache_reward,
        curse_penalty = config.economy.curse_penalty,
        slot_line_multiplier = config.economy.slot_line_multiplier,
        ledger_max_entries = config.ledger.max_entries,
        oracle_timeout_ms = config.oracle.timeout_ms,
        seeded = config.rng.seed.is_some(),
        "Configuration loaded"
    );

    // 3. Build the launch content.
    let content = bayou_world::create_starting_content()?;
    let demo = content.seed_player().clone();
    info!(
        venues = content.venues().len(),
        lore = content.lore_seed().len(),
        symbols = content.symbols().len(),
        "Launch content ready"
    );

    // 4. Create the engine and seed the demo player.
    let engine = Engine::new(
        content,
        &config,
        InMemorySessionStore::new(),
        CannedOracle::bayou(),
    );
    engine.register(demo).await?;

    // 5. Serve.
    let state = Arc::new(AppState::new(engine));
    bayou_api::start_server(&config.server, state).await?;

    info!("bayou-server stopped");
    Ok(())
}

/// Load configuration from `BAYOU_CONFIG` or `bayou-config.yaml`.
///
/// A missing file is not an error: defaults are used, with the
/// `BAYOU_HOST`/`BAYOU_PORT` overrides still applied.
fn load_config() -> Result<(BayouConfig, String), ServerError> {
    let path = std::env::var("BAYOU_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

    if path.exists() {
        let config = BayouConfig::from_file(&path)?;
        Ok((config, path.display().to_string()))
    } else {
        let mut config = BayouConfig::default();
        config.server.apply_env_overrides();
        Ok((config, "defaults".to_owned()))
    }
}
