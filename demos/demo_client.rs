//! Call the `suggest_meal` tool on a running MCP server
//!
//! Start the server first with `cargo run -- serve`, then:
//!
//! ```bash
//! cargo run --example demo_client
//! ```

use meal_mcp::McpClient;

const MCP_URL: &str = "http://127.0.0.1:8000/mcp";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = McpClient::connect(MCP_URL).await?;

    let tools = client.list_tools().await?;
    println!("Tools:");
    for tool in &tools {
        println!("  - {}: {}", tool.name, tool.description);
    }

    let context = "I have beef, cream, and onions";
    let outcome = client.suggest_meal(context).await?;
    println!("\nResult:\n{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
