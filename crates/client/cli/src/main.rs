//! Headless battle simulator entry point.
//!
//! Plays one scenario with the auto player on both sides, logs the battle
//! to stderr and prints the final report as JSON on stdout.
mod battle_log;
mod config;
mod report;

use anyhow::{Context, Result};
use tactics_content::ContentFactory;
use tactics_core::Battle;
use tactics_runtime::{AutoPlayer, Session, SessionConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use battle_log::BattleLog;
use config::SimConfig;
use report::JsonReportSink;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();
    let config = SimConfig::from_env();
    tracing::info!(?config, "Simulator configured");

    let factory = match &config.data_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::bundled(),
    };
    let mut battle_config = factory
        .load_config()
        .with_context(|| format!("loading config from {}", factory.data_dir().display()))?;
    if let Some(seed) = config.seed {
        battle_config.roll_seed = seed;
    }
    let scenario = factory
        .resolve_scenario(&config.scenario)
        .with_context(|| format!("resolving scenario '{}'", config.scenario))?;

    let names: Vec<_> = scenario
        .units
        .iter()
        .map(|unit| (unit.id, unit.name.clone()))
        .collect();
    let battle = Battle::builder(scenario)
        .config(battle_config.clone())
        .build()
        .context("building battle")?;

    let session = Session::builder(battle)
        .config(SessionConfig {
            enemy_step_delay: config.pacing,
            max_turns: config.max_turns,
            ..SessionConfig::default()
        })
        .player(AutoPlayer::default())
        .sink(JsonReportSink::new(battle_config.roll_seed, config.pretty))
        .build();
    let log_task = BattleLog::new(names).spawn(&session.handle());

    let outcome = session.run_to_completion().await;
    session.shutdown().await?;
    // The worker is gone, so the battle topic is closed.
    log_task.await?;

    let report = outcome.context("running battle")?;
    tracing::info!(
        outcome = %report.outcome,
        turns = report.turns,
        survivors = report.survivors.len(),
        "Simulation finished"
    );
    Ok(())
}

/// Logs to stderr so stdout carries only the JSON report.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
