//! # signbridge
//!
//! Backend server binary. Loads settings, initializes logging, attempts
//! to load the sign-notation model, and serves HTTP until ctrl-c.

#![deny(unsafe_code)]

mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use signbridge_notation::NotationEngine;
use signbridge_server::SignbridgeServer;
use signbridge_settings::Settings;

/// Speech-to-text and sign-language backend server.
#[derive(Parser, Debug)]
#[command(name = "signbridge", about = "Speech-to-text and sign-language backend")]
struct Cli {
    /// Host to bind (overrides settings).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides settings, 0 for auto-assign).
    #[arg(long)]
    port: Option<u16>,

    /// Settings file (defaults to `~/.signbridge/settings.json`).
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Load settings and fold in CLI overrides.
///
/// An explicitly named `--config` file must parse; the default path
/// falls back to compiled defaults so a fresh install starts without
/// any file at all.
fn effective_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => signbridge_settings::load_settings_from_path(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => signbridge_settings::load_settings().unwrap_or_default(),
    };

    if let Some(host) = &cli.host {
        settings.server.host.clone_from(host);
    }
    if let Some(port) = cli.port {
        settings.server.port = port;
    }
    Ok(settings)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Settings come first: the log level lives in them.
    let settings = effective_settings(&args)?;
    logging::init_subscriber(settings.logging.level.as_filter_str());

    settings.validate().context("Settings validation failed")?;

    // The notation model is optional. A missing or broken file degrades
    // /translate_signwriting, not the whole server.
    let notation = Arc::new(NotationEngine::new());
    match notation.load(&settings.notation.model_path).await {
        Ok(()) => tracing::info!(
            path = %settings.notation.model_path.display(),
            "sign-notation model loaded"
        ),
        Err(err) => tracing::warn!(
            error = %err,
            "sign-notation model unavailable, /translate_signwriting will answer 500"
        ),
    }

    let server = SignbridgeServer::new(settings, notation);
    let (addr, handle) = server.listen().await.context("Failed to bind server")?;
    tracing::info!("signbridge listening on http://{addr}");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl-c")?;

    tracing::info!("Shutting down...");
    server.shutdown().drain(vec![handle], None).await;
    tracing::info!("Shutdown complete");
    Ok(())
}
