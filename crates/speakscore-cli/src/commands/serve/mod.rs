//! WebSocket server for browser and tool integration.
//!
//! Accepts encode and assess requests over a local WebSocket and answers with
//! the same JSON structures the `--json` CLI flags produce. This is the
//! counterpart of an HTTP assessment route for clients that already hold a
//! recording in memory.
//!
//! ## Protocol
//!
//! Requests are JSON objects with a `type` field:
//!
//! - `encode_data`: Re-encode a WAV into canonical 16-bit PCM
//!   ```json
//!   {"type": "encode_data", "data": "<base64>", "mono": false}
//!   ```
//!
//! - `assess_data`: Encode and score against a reference sentence
//!   ```json
//!   {"type": "assess_data", "data": "<base64>", "reference_text": "Today was a beautiful day."}
//!   ```
//!
//! Responses are `{"success": bool, "errors": [...], "result": {...}}`.

mod handler;
mod types;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;
use tokio_tungstenite::tungstenite::Message;

use speakscore_assess::{AzureSpeechClient, PronunciationOracle, SpeechConfig};

pub use handler::{assess_data, encode_data, handle_request};
pub use types::{ErrorResponse, ServeRequest};

/// Default port for the WebSocket server.
pub const DEFAULT_PORT: u16 = 9124;

/// Resolve speech settings for the server.
///
/// Missing or blank credentials are logged and yield `None`, so the server
/// still starts with `assess_data` disabled.
pub fn speech_config(
    key: Option<String>,
    region: Option<String>,
    language: String,
) -> Option<SpeechConfig> {
    match SpeechConfig::from_parts(key, region) {
        Ok(config) => Some(config.with_language(language)),
        Err(e) => {
            tracing::warn!(error = %e, "assess requests will be refused");
            None
        }
    }
}

/// Run the WebSocket server.
///
/// # Arguments
/// * `port` - Port to listen on
/// * `config` - Speech service settings; `assess_data` is refused without them
///
/// # Returns
/// Exit code: 0 on clean shutdown, 1 on error
pub fn run(port: u16, config: Option<SpeechConfig>) -> Result<ExitCode> {
    let oracle = match config {
        Some(config) => Some(Arc::new(
            AzureSpeechClient::new(config).context("Failed to create speech client")?,
        )),
        None => None,
    };

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    rt.block_on(async move { run_server(port, oracle).await })
}

/// Run the WebSocket server (async entry point).
async fn run_server<O>(port: u16, oracle: Option<Arc<O>>) -> Result<ExitCode>
where
    O: PronunciationOracle + 'static,
{
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    eprintln!("WebSocket server listening on ws://{}", addr);
    eprintln!("Press Ctrl+C to shutdown");

    let (shutdown_tx, _) = broadcast::channel::<()>(1);
    let shutdown_tx = Arc::new(shutdown_tx);

    let shutdown_tx_clone = Arc::clone(&shutdown_tx);
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            eprintln!("\nShutting down...");
            let _ = shutdown_tx_clone.send(());
        }
    });

    let mut shutdown_rx = shutdown_tx.subscribe();

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        tracing::info!(%peer_addr, "new connection");
                        let shutdown_rx = shutdown_tx.subscribe();
                        let oracle = oracle.clone();
                        tokio::spawn(handle_connection(stream, peer_addr, oracle, shutdown_rx));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "accept failed");
                    }
                }
            }
            _ = shutdown_rx.recv() => {
                eprintln!("Server shutdown complete");
                break;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Handle a single WebSocket connection.
async fn handle_connection<O>(
    stream: TcpStream,
    peer_addr: SocketAddr,
    oracle: Option<Arc<O>>,
    mut shutdown_rx: broadcast::Receiver<()>,
) where
    O: PronunciationOracle + 'static,
{
    let ws_stream = match tokio_tungstenite::accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            tracing::warn!(%peer_addr, error = %e, "WebSocket handshake failed");
            return;
        }
    };

    let (mut write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            msg_opt = read.next() => {
                match msg_opt {
                    Some(Ok(msg)) => {
                        let response = handler::process_message(msg, oracle.as_deref()).await;
                        if let Some(response) = response {
                            if let Err(e) = write.send(Message::Text(response)).await {
                                tracing::warn!(%peer_addr, error = %e, "send failed");
                                break;
                            }
                        }
                    }
                    Some(Err(e)) => {
                        tracing::warn!(%peer_addr, error = %e, "receive failed");
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

    tracing::info!(%peer_addr, "connection closed");
}
