//! MCP over HTTP: a single `POST /mcp` endpoint speaking JSON-RPC 2.0.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;

use super::jsonrpc::{
    JsonRpcRequest, JsonRpcResponse, ERROR_INTERNAL, ERROR_INVALID_PARAMS, ERROR_INVALID_REQUEST,
    ERROR_METHOD_NOT_FOUND, ERROR_PARSE, JSONRPC_VERSION,
};
use super::schema::{get_tools, initialize_result, tool_result, SUGGEST_MEAL_TOOL};
use crate::suggest::MealSuggester;

#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// Routes JSON-RPC requests to the meal suggester
pub struct McpServer {
    suggester: MealSuggester,
}

impl McpServer {
    #[must_use]
    pub fn new(suggester: MealSuggester) -> Self {
        Self { suggester }
    }

    /// Axum router exposing `POST /mcp` and `GET /health`
    pub fn router(self) -> Router {
        Router::new()
            .route("/mcp", post(handle_mcp))
            .route("/health", get(health))
            .with_state(Arc::new(self))
    }

    /// Handle one request; `None` for notifications
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let start = Instant::now();
        debug!("MCP request: method={} id={:?}", request.method, request.id);

        if request.is_notification() {
            debug!("Notification {} acknowledged", request.method);
            return None;
        }

        let id = request.id.clone();
        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                id,
                ERROR_INVALID_REQUEST,
                format!(
                    "Invalid JSON-RPC version: got '{}', expected '{}'",
                    request.jsonrpc, JSONRPC_VERSION
                ),
            ));
        }

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, initialize_result()),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(id, json!({ "tools": get_tools() })),
            "tools/call" => self.handle_tools_call(id, request.params).await,
            method => JsonRpcResponse::error(
                id,
                ERROR_METHOD_NOT_FOUND,
                format!("Unknown method: {method}"),
            ),
        };

        debug!("{} handled in {:?}", request.method, start.elapsed());
        Some(response)
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match params.map(serde_json::from_value) {
            Some(Ok(params)) => params,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    id,
                    ERROR_INVALID_PARAMS,
                    format!("Invalid tools/call parameters: {e}"),
                )
            }
            None => {
                return JsonRpcResponse::error(id, ERROR_INVALID_PARAMS, "Missing parameters")
            }
        };

        if params.name != SUGGEST_MEAL_TOOL {
            return JsonRpcResponse::error(
                id,
                ERROR_INVALID_PARAMS,
                format!("Unknown tool: {}", params.name),
            );
        }

        // Missing or non-string context is reported by the suggester itself
        let context = params
            .arguments
            .get("context")
            .and_then(Value::as_str)
            .unwrap_or_default();
        info!("suggest_meal called with {} chars of context", context.len());

        let outcome = self.suggester.suggest(context).await;
        match serde_json::to_value(&outcome) {
            Ok(payload) => JsonRpcResponse::success(id, tool_result(payload)),
            Err(e) => JsonRpcResponse::error(id, ERROR_INTERNAL, format!("Internal error: {e}")),
        }
    }
}

async fn handle_mcp(State(server): State<Arc<McpServer>>, body: String) -> Response {
    let request: JsonRpcRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejecting unparseable MCP request: {}", e);
            let response = JsonRpcResponse::error(None, ERROR_PARSE, format!("Parse error: {e}"));
            return Json(response).into_response();
        }
    };

    match server.handle_request(request).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

pub(crate) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Bind and serve the MCP router until Ctrl-C
pub async fn serve(server: McpServer, addr: &str) -> crate::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("MCP server listening on http://{}/mcp", listener.local_addr()?);
    axum::serve(listener, server.router())
        .with_graceful_shutdown(crate::shutdown_signal())
        .await?;
    Ok(())
}
