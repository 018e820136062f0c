//! Line-delimited JSON-RPC server loop.

use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use super::protocol::{JsonRpcRequest, JsonRpcResponse, RpcError, JSONRPC_VERSION, PROTOCOL_VERSION};
use super::tools::{call_tool, tool_definitions};
use crate::client::GrokipediaClient;

pub const SERVER_NAME: &str = "grokipedia";

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// Agent-protocol server exposing the client as two tools.
#[derive(Debug, Clone)]
pub struct McpServer {
    client: GrokipediaClient,
}

impl McpServer {
    pub fn new(client: GrokipediaClient) -> Self {
        Self { client }
    }

    /// Serves stdin/stdout until stdin closes.
    pub async fn serve_stdio(&self) -> io::Result<()> {
        self.serve(BufReader::new(io::stdin()), io::stdout()).await
    }

    /// Reads one JSON-RPC message per line and writes one response per
    /// request. Blank lines are ignored, notifications get no reply. The
    /// client's cache is released when the input ends.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("agent server started");
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_line(&line).await {
                let mut payload = serde_json::to_vec(&response)?;
                payload.push(b'\n');
                writer.write_all(&payload).await?;
                writer.flush().await?;
            }
        }

        self.client.close().await;
        info!("agent server stopped");
        Ok(())
    }

    /// Handles one raw message.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "unparsable message");
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    &RpcError::Parse(e.to_string()),
                ));
            }
        };

        if request.is_notification() {
            debug!(method = %request.method, "notification");
            return None;
        }
        let id = request.id.clone().unwrap_or(Value::Null);

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::failure(
                id,
                &RpcError::InvalidRequest(format!("unsupported jsonrpc version '{}'", request.jsonrpc)),
            ));
        }

        Some(match self.dispatch(&request).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(err) => {
                debug!(method = %request.method, error = %err, "request failed");
                JsonRpcResponse::failure(id, &err)
            }
        })
    }

    async fn dispatch(&self, request: &JsonRpcRequest) -> Result<Value, RpcError> {
        match request.method.as_str() {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": env!("CARGO_PKG_VERSION"),
                },
            })),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tool_definitions() })),
            "tools/call" => {
                let params: CallParams =
                    serde_json::from_value(request.params.clone().unwrap_or(Value::Null))
                        .map_err(|e| RpcError::InvalidParams(e.to_string()))?;
                let output = call_tool(&self.client, &params.name, params.arguments).await?;
                Ok(output.to_value())
            }
            other => Err(RpcError::MethodNotFound(other.to_string())),
        }
    }
}
