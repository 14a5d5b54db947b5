//! JSON-RPC server over stdin/stdout.
//!
//! Implements the JSON-RPC 2.0 protocol for studio communication. Requests
//! are handled one at a time in arrival order; a flow's own model calls may
//! still run concurrently.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::config::StudioConfig;
use crate::error::Result;
use crate::model::{GeminiClient, ModelBackend};
use crate::studio::Studio;

use super::methods::handle_request;
use super::types::{JsonRpcError, JsonRpcErrorResponse, JsonRpcRequest, JsonRpcResponse};

/// State shared across all request handlers.
pub struct ServerState<B> {
    /// Studio for model-backed methods. `None` when no API key is configured.
    pub studio: Option<Studio<B>>,
    /// Studio configuration, used by local methods.
    pub config: StudioConfig,
    /// Flag to signal server shutdown.
    shutdown: Arc<AtomicBool>,
}

impl ServerState<GeminiClient> {
    /// Creates server state talking to the Gemini API.
    ///
    /// A missing API key is not fatal: local methods keep working and model
    /// methods answer with a configuration error.
    pub fn from_config(config: StudioConfig) -> Self {
        let studio = match Studio::from_config(config.clone()) {
            Ok(studio) => Some(studio),
            Err(e) => {
                tracing::warn!(error = %e, "model methods disabled");
                None
            }
        };
        Self::with_studio(studio, config)
    }
}

impl<B: ModelBackend> ServerState<B> {
    /// Creates server state around an existing studio.
    pub fn with_studio(studio: Option<Studio<B>>, config: StudioConfig) -> Self {
        Self {
            studio,
            config,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Signals the server to shut down.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Returns true if shutdown has been requested.
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }
}

/// Runs the JSON-RPC server, reading from stdin and writing to stdout.
pub async fn run_server<B: ModelBackend>(state: ServerState<B>) -> Result<()> {
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    tracing::info!(
        model_methods = state.studio.is_some(),
        "JSON-RPC server started, waiting for requests"
    );

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "error reading stdin");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        if let Some(response) = process_request(&line, &state).await {
            let written = async {
                stdout.write_all(response.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await
            }
            .await;
            if let Err(e) = written {
                tracing::error!(error = %e, "error writing stdout");
                break;
            }
        }

        if state.is_shutdown() {
            tracing::info!("server shutdown requested");
            break;
        }
    }

    tracing::info!("JSON-RPC server stopped");
    Ok(())
}

/// Processes a single JSON-RPC request line.
async fn process_request<B: ModelBackend>(line: &str, state: &ServerState<B>) -> Option<String> {
    let request: JsonRpcRequest = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            let error = JsonRpcErrorResponse::new(
                None,
                JsonRpcError::parse_error(format!("Invalid JSON: {}", e)),
            );
            return Some(serde_json::to_string(&error).unwrap_or_default());
        }
    };

    if request.jsonrpc != "2.0" {
        let error = JsonRpcErrorResponse::new(
            Some(request.id),
            JsonRpcError::invalid_request("Invalid JSON-RPC version (expected 2.0)"),
        );
        return Some(serde_json::to_string(&error).unwrap_or_default());
    }

    tracing::debug!(method = %request.method, "request received");
    match handle_request(&request.method, request.params, state).await {
        Ok(result) => {
            Some(serde_json::to_string(&JsonRpcResponse::new(request.id, result)).unwrap_or_default())
        }
        Err(error) => {
            tracing::warn!(
                method = %request.method,
                code = error.code,
                message = %error.message,
                "request failed"
            );
            Some(
                serde_json::to_string(&JsonRpcErrorResponse::new(Some(request.id), error))
                    .unwrap_or_default(),
            )
        }
    }
}
