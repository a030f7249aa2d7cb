use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use meal_mcp::{proxy, Candidate, McpServer, MealSuggester, RecipeDetail, RecipeGateway};
use mockito::{Matcher, Server};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Search finds nothing, so every call ends in the "no meals" message
struct EmptyGateway;

#[async_trait]
impl RecipeGateway for EmptyGateway {
    async fn search_by_ingredient(&self, _ingredient: &str) -> Vec<Candidate> {
        Vec::new()
    }

    async fn fetch_details(&self, _id: &str) -> Option<RecipeDetail> {
        None
    }
}

/// Start an MCP server on an ephemeral port and return its /mcp URL
async fn spawn_mcp_server() -> String {
    let suggester = MealSuggester::builder().gateway(EmptyGateway).build().unwrap();
    let app = McpServer::new(suggester).router();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/mcp")
}

async fn post_suggest(mcp_url: &str, body: Value) -> (StatusCode, Value) {
    send_suggest(proxy::router(mcp_url).unwrap(), body).await
}

async fn send_suggest(app: axum::Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/mcp/suggest")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_proxy_forwards_to_mcp_server() {
    let mcp_url = spawn_mcp_server().await;

    let (status, body) = post_suggest(&mcp_url, json!({"context": "I have quinoa"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "No meals found from 'quinoa'."}));
}

#[tokio::test]
async fn test_proxy_passes_input_errors_through() {
    let mcp_url = spawn_mcp_server().await;

    let (status, body) = post_suggest(&mcp_url, json!({"context": ""})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["error"],
        "Please provide 'context' containing ingredients (string)."
    );
}

#[tokio::test]
async fn test_proxy_reports_unreachable_server() {
    // Bind and drop to get a port with nothing listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (status, body) =
        post_suggest(&format!("http://{addr}/mcp"), json!({"context": "I have eggs"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("HTTP request failed"));
}

#[tokio::test]
async fn test_proxy_rejects_missing_context() {
    let mcp_url = spawn_mcp_server().await;

    let (status, _) = post_suggest(&mcp_url, json!({"ingredients": "eggs"})).await;

    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_proxy_initializes_session_before_calling_tool() {
    let mut server = Server::new_async().await;
    let initialize = server
        .mock("POST", "/mcp")
        .match_body(Matcher::PartialJson(json!({"method": "initialize"})))
        .with_status(200)
        .with_body(r#"{"jsonrpc": "2.0", "id": 1, "result": {"protocolVersion": "2024-11-05"}}"#)
        .expect(1)
        .create_async()
        .await;
    let initialized = server
        .mock("POST", "/mcp")
        .match_body(Matcher::PartialJson(
            json!({"method": "notifications/initialized"}),
        ))
        .with_status(202)
        .expect(1)
        .create_async()
        .await;
    let calls = server
        .mock("POST", "/mcp")
        .match_body(Matcher::PartialJson(json!({
            "method": "tools/call",
            "params": {"name": "suggest_meal", "arguments": {"context": "I have chicken, rice, tomato"}}
        })))
        .with_status(200)
        .with_body(
            r#"{"jsonrpc": "2.0", "id": 2, "result": {
                "content": [{"type": "text", "text": "{}"}],
                "structuredContent": {"message": "No meals found from 'chicken, rice, tomato'."},
                "isError": false
            }}"#,
        )
        .expect(2)
        .create_async()
        .await;

    let app = proxy::router(format!("{}/mcp", server.url())).unwrap();
    let body = json!({"context": "I have chicken, rice, tomato"});
    let (first, _) = send_suggest(app.clone(), body.clone()).await;
    let (second, payload) = send_suggest(app, body).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
    assert_eq!(
        payload,
        json!({"message": "No meals found from 'chicken, rice, tomato'."})
    );
    initialize.assert_async().await;
    initialized.assert_async().await;
    calls.assert_async().await;
}
