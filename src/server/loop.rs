// Server loop module
// Accepts connections until the shutdown future resolves

use std::future::Future;
use tokio::net::TcpListener;
use tracing::{error, info};

use super::connection::handle_connection;
use super::fallback::NotFound;
use crate::handler::StaticLayer;

/// Accept loop: every connection is served by `layer` wrapped around [`NotFound`]
///
/// In-flight connections keep running in their own tasks after `shutdown`
/// resolves; only accepting stops.
pub async fn run(
    listener: TcpListener,
    layer: StaticLayer,
    shutdown: impl Future<Output = ()>,
) -> std::io::Result<()> {
    let service = layer.layer(NotFound);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => handle_connection(stream, peer_addr, service.clone()),
                    Err(e) => error!(error = %e, "failed to accept connection"),
                }
            }

            () = &mut shutdown => {
                info!(addr = %listener.local_addr()?, "shutdown requested, no longer accepting");
                return Ok(());
            }
        }
    }
}
