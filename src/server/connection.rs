// Connection handling module
// Serves one accepted TCP connection with the middleware stack

use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use tokio::net::TcpStream;
use tracing::{debug, warn};

use super::fallback::NotFound;
use crate::handler::StaticAssets;

/// Serve `stream` in a spawned task.
///
/// HTTP/1.1 with keep-alive; connection errors are logged and end the task.
pub fn handle_connection(stream: TcpStream, peer_addr: SocketAddr, service: StaticAssets<NotFound>) {
    tokio::spawn(async move {
        debug!(%peer_addr, "connection accepted");
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new()
            .keep_alive(true)
            .serve_connection(io, service);

        if let Err(err) = conn.await {
            warn!(%peer_addr, error = %err, "failed to serve connection");
        }
    });
}
