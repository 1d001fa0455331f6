//! Helm Reporter - Main Entry Point
//!
//! Wires the configured line source (live serial or a replayed capture
//! file) to the pipeline with the standard handler registry, and runs until
//! the source is exhausted.

use anyhow::Context;
use clap::Parser;
use helm_reporter::config::{Cli, Config};
use helm_reporter::dispatch::{Dispatcher, HandlerRegistry};
use helm_reporter::pipeline::Pipeline;
use helm_reporter::sink::HttpSink;
use helm_reporter::source::{ReplaySource, SerialSource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,helm_reporter=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)
        .context("failed to load configuration")?
        .with_overrides(&cli);

    tracing::info!(report_uri = %config.network.report_uri, "starting helm reporter");

    let sink = HttpSink::new(config.network.report_uri.clone());
    let registry = HandlerRegistry::with_defaults(Box::new(sink));
    let dispatcher = Dispatcher::new(registry);

    let stats = match &cli.replay {
        Some(file) => {
            let source = ReplaySource::open(file)
                .with_context(|| format!("failed to open capture file {}", file.display()))?;
            Pipeline::new(source, dispatcher).run()?
        }
        None => {
            let source = SerialSource::open(&config.serial)
                .with_context(|| format!("failed to open serial port {}", config.serial.port))?;
            Pipeline::new(source, dispatcher).run()?
        }
    };

    tracing::info!(
        lines = stats.lines_read,
        dispatched = stats.dispatched,
        "shutting down"
    );
    Ok(())
}
