//! WebSocket suggestion server.
//!
//! Accepts tone-suggestion requests over WebSocket and answers each one with
//! the suggestion envelope or an error object.
//!
//! ## Protocol
//!
//! Every text message (or UTF-8 binary message) is one request:
//!
//! ```json
//! {"instrument": "piano", "style": "lofi", "mode": "melody", "bars": 4,
//!  "textPrompt": "dreamy", "projectId": "p-1", "seed": 42}
//! ```
//!
//! Success:
//!
//! ```json
//! {"success": true, "suggestion": {"id": "...", "audioUrl": "data:audio/wav;base64,...", ...},
//!  "prompt": "dreamy"}
//! ```
//!
//! Failure (`status` mirrors the HTTP status of the equivalent REST call):
//!
//! Renders are CPU-bound, so at most `max_concurrent` run at once across
//! all connections. A request that cannot start rendering before its
//! deadline is answered with the timeout error.
//!
//!
//! ```json
//! {"error": "Failed to generate AI suggestion", "details": "...", "code": "E002", "status": 400}
//! ```

mod handler;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{broadcast, Semaphore};
use tokio_tungstenite::tungstenite::Message;

use crate::service::ServiceConfig;

pub use handler::{handle_request, process_message};

/// Default port for the WebSocket server.
pub const DEFAULT_PORT: u16 = 9124;

/// Default number of clips rendered at once.
pub const DEFAULT_MAX_CONCURRENT: u32 = 4;

/// State shared by every connection.
pub struct ServerState {
    config: ServiceConfig,
    renders: Semaphore,
    requests: AtomicU64,
}

impl ServerState {
    /// Creates server state allowing `max_concurrent` simultaneous renders.
    pub fn new(config: ServiceConfig, max_concurrent: usize) -> Self {
        Self {
            config,
            renders: Semaphore::new(max_concurrent.max(1)),
            requests: AtomicU64::new(0),
        }
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    fn next_request_id(&self) -> u64 {
        self.requests.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Run the WebSocket suggestion server.
///
/// # Returns
/// Exit code: 0 on clean shutdown
pub fn run(port: u16, config: ServiceConfig, max_concurrent: usize) -> Result<ExitCode> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    let state = Arc::new(ServerState::new(config, max_concurrent));
    rt.block_on(run_server(port, state))
}

/// Run the WebSocket server (async entry point).
async fn run_server(port: u16, state: Arc<ServerState>) -> Result<ExitCode> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    log::info!(
        "suggestion server listening on ws://{} (max {} bars, {:?} deadline, {} concurrent renders)",
        addr,
        state.config.budget.bar_limit(),
        state.config.timeout,
        state.renders.available_permits()
    );
    eprintln!("Press Ctrl+C to shutdown");

    let (shutdown_tx, _) = broadcast::channel::<()>(1);
    let shutdown_tx = Arc::new(shutdown_tx);

    let shutdown_tx_clone = Arc::clone(&shutdown_tx);
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            log::info!("shutting down");
            let _ = shutdown_tx_clone.send(());
        }
    });

    let mut shutdown_rx = shutdown_tx.subscribe();

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        log::info!("new connection from {}", peer_addr);
                        let shutdown_rx = shutdown_tx.subscribe();
                        tokio::spawn(handle_connection(stream, peer_addr, Arc::clone(&state), shutdown_rx));
                    }
                    Err(e) => {
                        log::error!("accept error: {}", e);
                    }
                }
            }
            _ = shutdown_rx.recv() => {
                log::info!("server shutdown complete after {} requests", state.request_count());
                break;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Handle a single WebSocket connection.
async fn handle_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: Arc<ServerState>,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    let ws_stream = match tokio_tungstenite::accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            log::warn!("WebSocket handshake failed for {}: {}", peer_addr, e);
            return;
        }
    };

    let (mut write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            msg_opt = read.next() => {
                match msg_opt {
                    Some(Ok(msg)) => {
                        if let Some(response) = handler::process_message(msg, &state).await {
                            if let Err(e) = write.send(Message::Text(response)).await {
                                log::warn!("send error for {}: {}", peer_addr, e);
                                break;
                            }
                        }
                    }
                    Some(Err(e)) => {
                        log::warn!("receive error for {}: {}", peer_addr, e);
                        break;
                    }
                    None => break,
                }
            }
            _ = shutdown_rx.recv() => {
                let _ = write.send(Message::Close(None)).await;
                break;
            }
        }
    }

    log::info!("connection closed: {}", peer_addr);
}
