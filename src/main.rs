// Demo host for the static asset middleware
// Reads its own settings (optional argv[1] file stem, `config.toml`, `SERVER_*`
// variables); none of this is part of the middleware's configuration, which
// is built in code through `StaticConfig`.

use static_assets::config::ServerSettings;
use static_assets::{logger, server, StaticLayer};
use tracing::{info, warn};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config".to_string());
    let settings = ServerSettings::load_from(&config_path)?;
    logger::init(&settings.logging)?;

    // Create the Tokio runtime, sizing the worker pool from the configuration
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = settings.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(settings))
}

async fn async_main(settings: ServerSettings) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = settings.socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;
    let layer = StaticLayer::from_config(settings.assets.to_static_config());

    logger::log_server_start(&addr, &settings);

    server::run(listener, layer, shutdown_signal()).await?;
    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
