//! Fleetyard desktop application.
//!
//! Loads configuration, initializes tracing, and launches the yard map GUI.

use anyhow::{Context, Result};
use clap::Parser;
use fleetyard_core::config::AppConfig;
use fleetyard_gui::FleetyardApp;
use std::path::PathBuf;
use tracing::info;

/// Fleetyard - municipal vehicle yard map
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/fleetyard.yaml")]
    config: PathBuf,

    /// Override the store script URL
    #[arg(long, env = "FLEETYARD_SCRIPT_URL")]
    url: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = if args.config.exists() {
        AppConfig::from_config_builder(&args.config)
            .with_context(|| format!("failed to load {}", args.config.display()))?
    } else {
        AppConfig::default()
    };
    if let Some(url) = args.url {
        config.gateway.script_url = url;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.logging.tracing_level().into()),
        )
        .init();

    config.validate().context("invalid configuration")?;
    info!(config = %args.config.display(), "starting fleetyard");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 780.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Fleetyard - Vehicle Yard Map",
        options,
        Box::new(move |cc| {
            let app = FleetyardApp::new(cc, config).map_err(|e| -> Box<dyn std::error::Error + Send + Sync> { e.into() })?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("GUI terminated with error: {e}"))
}
