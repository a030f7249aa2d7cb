//! Plain HTTP front for the MCP tool: `POST /mcp/suggest {"context": "..."}`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::error::MealError;
use crate::mcp::{McpClient, SUGGEST_MEAL_TOOL};

#[derive(Debug, Serialize, Deserialize)]
pub struct ProxyRequest {
    pub context: String,
}

/// Failure talking to the MCP server, answered as 500 with a `detail` field
pub struct ProxyError(MealError);

impl From<MealError> for ProxyError {
    fn from(err: MealError) -> Self {
        ProxyError(err)
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        error!("Proxy call failed: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": self.0.to_string() })),
        )
            .into_response()
    }
}

/// Router forwarding suggestions to the MCP server at `mcp_url`.
///
/// The shared client completes the `initialize` handshake on the first forwarded call.
pub fn router(mcp_url: impl Into<String>) -> crate::Result<Router> {
    let client = McpClient::new(mcp_url)?;
    Ok(Router::new()
        .route("/mcp/suggest", post(suggest))
        .route("/health", get(crate::mcp::health))
        .with_state(Arc::new(client)))
}

async fn suggest(
    State(client): State<Arc<McpClient>>,
    Json(request): Json<ProxyRequest>,
) -> Result<Json<Value>, ProxyError> {
    let payload = client
        .call_tool(SUGGEST_MEAL_TOOL, json!({ "context": request.context }))
        .await?;
    Ok(Json(payload))
}

/// Bind and serve the proxy until Ctrl-C
pub async fn serve(mcp_url: &str, addr: &str) -> crate::Result<()> {
    let app = router(mcp_url)?;
    let listener = TcpListener::bind(addr).await?;
    info!(
        "Proxy listening on http://{}/mcp/suggest, forwarding to {}",
        listener.local_addr()?,
        mcp_url
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(crate::shutdown_signal())
        .await?;
    Ok(())
}
