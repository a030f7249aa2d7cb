use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::OnceCell;

use super::jsonrpc::{JsonRpcRequest, JsonRpcResponse};
use super::schema::{ToolSchema, PROTOCOL_VERSION, SUGGEST_MEAL_TOOL};
use crate::error::{MealError, Result};
use crate::model::SuggestOutcome;

const CLIENT_NAME: &str = "meal-mcp-client";

/// Minimal MCP client speaking JSON-RPC over HTTP.
///
/// The `initialize` handshake runs once, before the first tool request.
pub struct McpClient {
    client: Client,
    endpoint: String,
    next_id: AtomicU64,
    session: OnceCell<Value>,
}

impl McpClient {
    /// Create a client for an MCP endpoint such as `http://127.0.0.1:8000/mcp`
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;
        Ok(McpClient {
            client,
            endpoint: endpoint.into(),
            next_id: AtomicU64::new(1),
            session: OnceCell::new(),
        })
    }

    /// Create a client and complete the `initialize` handshake
    pub async fn connect(endpoint: impl Into<String>) -> Result<Self> {
        let client = Self::new(endpoint)?;
        client.initialize().await?;
        Ok(client)
    }

    /// Perform the `initialize` handshake and return the server's answer.
    ///
    /// A failed handshake is retried on the next call.
    pub async fn initialize(&self) -> Result<Value> {
        self.session
            .get_or_try_init(|| self.handshake())
            .await
            .cloned()
    }

    async fn handshake(&self) -> Result<Value> {
        let result = self
            .request(
                "initialize",
                Some(json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": {},
                    "clientInfo": {
                        "name": CLIENT_NAME,
                        "version": env!("CARGO_PKG_VERSION")
                    }
                })),
            )
            .await?;
        self.notify("notifications/initialized").await?;
        Ok(result)
    }

    /// Tools the server exposes
    pub async fn list_tools(&self) -> Result<Vec<ToolSchema>> {
        self.initialize().await?;
        let result = self.request("tools/list", None).await?;
        let tools = result
            .get("tools")
            .cloned()
            .ok_or_else(|| MealError::InvalidResponse("tools/list without 'tools'".to_string()))?;
        Ok(serde_json::from_value(tools)?)
    }

    /// Call a tool and return its structured content.
    ///
    /// A result flagged `isError` becomes [`MealError::InvalidResponse`] with the tool's text.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<Value> {
        self.initialize().await?;
        let result = self
            .request(
                "tools/call",
                Some(json!({ "name": name, "arguments": arguments })),
            )
            .await?;

        let text = result.pointer("/content/0/text").and_then(Value::as_str);
        if result.get("isError").and_then(Value::as_bool) == Some(true) {
            let detail = text.unwrap_or("tool reported an error without text");
            return Err(MealError::InvalidResponse(format!("{name} failed: {detail}")));
        }

        if let Some(structured) = result.get("structuredContent") {
            return Ok(structured.clone());
        }

        // Servers without structured output put the JSON in the first text block
        let text = text.ok_or_else(|| MealError::InvalidResponse(format!("{name} returned no content")))?;
        Ok(serde_json::from_str(text)?)
    }

    /// Call `suggest_meal` and decode its payload
    pub async fn suggest_meal(&self, context: &str) -> Result<SuggestOutcome> {
        let payload = self
            .call_tool(SUGGEST_MEAL_TOOL, json!({ "context": context }))
            .await?;
        Ok(serde_json::from_value(payload)?)
    }

    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest::new(method, params, id);
        debug!("-> {} (id {})", method, id);

        let response: JsonRpcResponse = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(error) = response.error {
            return Err(MealError::RpcError {
                code: error.code,
                message: error.message,
            });
        }

        response
            .result
            .ok_or_else(|| MealError::InvalidResponse(format!("{method} returned no result")))
    }

    async fn notify(&self, method: &str) -> Result<()> {
        self.client
            .post(&self.endpoint)
            .json(&JsonRpcRequest::notification(method, None))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
