//! Logger module
//!
//! Installs the `tracing` subscriber for the bundled host and writes its
//! startup banner. The middleware only emits `debug`/`trace` events and
//! leaves their routing to whichever subscriber the host installs.

use crate::config::{LoggingConfig, ServerSettings};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber
///
/// `RUST_LOG` takes precedence over the configured level. Should be called
/// once at application startup.
pub fn init(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
}

pub fn log_server_start(addr: &SocketAddr, settings: &ServerSettings) {
    let assets = &settings.assets;
    info!("Listening on: http://{addr}");
    info!(
        root = %assets.root,
        wildcard = assets.wildcard,
        base_dir = assets.base_dir.as_deref().unwrap_or("."),
        "Serving static assets"
    );
    if !assets.allow_list.is_empty() {
        info!(extra = ?assets.allow_list, "Additional root-level assets");
    }
    if let Some(workers) = settings.server.workers {
        info!("Worker threads: {workers}");
    }
}
