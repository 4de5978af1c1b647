//! # hostscout
//!
//! Host inventory and telemetry agent. Enumerates hardware, samples
//! runtime metrics on an interval, and correlates every record with its
//! cataloged hardware identity.

use anyhow::Result;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hostscout::cli::AgentArgs;
use hostscout::output::PayloadWriter;
use hostscout::{AgentConfig, AgentState};

#[tokio::main]
async fn main() -> Result<()> {
    let args = AgentArgs::parse_args();

    if let Some(path) = &args.gen_config {
        let toml_content = toml::to_string_pretty(&AgentConfig::default())?;
        std::fs::write(path, toml_content)?;
        println!("Generated configuration file: {}", path.display());
        return Ok(());
    }

    init_logging(&args.log_level)?;

    let config = match &args.config {
        Some(path) => AgentConfig::load_from_file(path)?,
        None => AgentConfig::load()?,
    };

    let writer = PayloadWriter::from_config(&config.output)?;
    let mut state = AgentState::new(config).await?;

    if let Some(category) = args.scan {
        let report = state.scan(category).await?;
        writer.write(&report)?;
        return Ok(());
    }

    if args.inventory {
        let inventory = state.scan_full()?;
        writer.write(&inventory)?;
        return Ok(());
    }

    if args.once {
        let checkpoint = state.collect_once().await?;
        writer.write(&checkpoint)?;
        return Ok(());
    }

    if let Err(e) = state.health_check().await {
        error!("initial health check failed: {e}");
        return Err(e);
    }

    info!("starting hostscout agent {}", state.id);

    tokio::select! {
        result = state.run(&writer) => {
            if let Err(e) = result {
                error!("collection loop error: {e}");
                return Err(e);
            }
        }
        _ = signal::ctrl_c() => {
            info!("received shutdown signal, stopping agent...");
        }
    }

    info!("hostscout stopped");
    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();

    Ok(())
}
