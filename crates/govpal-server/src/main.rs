//! GovPal server binary — loads settings, builds the router, and serves
//! until interrupted.

#![deny(unsafe_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use govpal_server::GovpalServer;
#[cfg(test)]
use govpal_settings::GovpalSettings;

/// GovPal composition engine server.
#[derive(Parser, Debug)]
#[command(name = "govpal", about = "GovPal adaptive dashboard server")]
struct Cli {
    /// Host to bind (overrides settings if specified).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides settings if specified).
    #[arg(long)]
    port: Option<u16>,

    /// Manifest collaborator base URL (overrides settings if specified).
    #[arg(long)]
    manifest_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Settings first so the log level default is known before logging init.
    let settings_path = govpal_settings::settings_path();
    let mut settings =
        govpal_settings::load_settings_from_path(&settings_path).unwrap_or_default();
    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    if let Some(url) = args.manifest_url {
        settings.manifest.base_url = Some(url);
    }

    govpal_core::logging::init(&settings.logging.level);
    govpal_settings::init_settings(settings.clone());

    let settings = Arc::new(settings);
    let bind = format!("{}:{}", settings.server.host, settings.server.port);
    let server = GovpalServer::new(Arc::clone(&settings));
    let router = server.router();

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    let addr = listener.local_addr().context("failed to read bound address")?;
    tracing::info!(%addr, manifest_url = ?settings.manifest.base_url, "govpal listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await
        .context("server error")?;

    Ok(())
}
