use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::config::{load_settings, prepare_api_base, Settings};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::CatalogApp;

const APP_NAME: &str = "Product Catalog Admin";

#[derive(Parser, Debug)]
#[command(version, about = "Desktop admin for the product catalog API")]
struct Args {
    /// TOML settings file; defaults to ./catalog.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the configured product API base url.
    #[arg(long)]
    api_base: Option<String>,
    #[arg(long)]
    log_filter: Option<String>,
}

fn resolve_settings(args: &Args) -> Result<Settings> {
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(api_base) = &args.api_base {
        settings.api_base = prepare_api_base(api_base)
            .with_context(|| format!("invalid --api-base value {api_base:?}"))?;
    }
    if let Some(filter) = &args.log_filter {
        settings.log_filter = filter.clone();
    }
    Ok(settings)
}

/// `--log-filter`, then `RUST_LOG`, then the configured filter.
fn log_filter(flag: Option<&str>, rust_log: Option<String>, configured: &str) -> String {
    flag.map(str::to_string)
        .or(rust_log.filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(|| configured.to_string())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = resolve_settings(&args)?;

    let directives = log_filter(
        args.log_filter.as_deref(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
        &settings.log_filter,
    );
    let filter = EnvFilter::try_new(&directives)
        .with_context(|| format!("invalid log filter {directives:?}"))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::info!(
        api_base = %settings.api_base,
        timeout_secs = settings.request_timeout_secs,
        "starting catalog admin"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    let api_base = settings.api_base.clone();
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_NAME,
        options,
        Box::new(|_cc| Ok(Box::new(CatalogApp::new(cmd_tx, ui_rx, api_base)))),
    )
    .map_err(|err| anyhow::anyhow!("desktop ui exited with error: {err}"))
}
