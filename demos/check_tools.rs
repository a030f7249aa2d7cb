//! List the tools a running MCP server exposes and try `suggest_meal` once
//!
//! ```bash
//! cargo run --example check_tools -- http://127.0.0.1:8000/mcp
//! ```

use meal_mcp::McpClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://127.0.0.1:8000/mcp".to_string());

    let client = McpClient::connect(url).await?;
    let names: Vec<String> = client
        .list_tools()
        .await?
        .into_iter()
        .map(|tool| tool.name)
        .collect();
    println!("Available tools: {:?}", names);

    let outcome = client.suggest_meal("I have chicken, rice, tomato").await?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
