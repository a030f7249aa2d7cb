use clap::{Parser, Subcommand};
use log::info;

use meal_mcp::{mcp, proxy, AppConfig, McpServer, MealSuggester};

#[derive(Parser)]
#[command(name = "meal-mcp")]
#[command(about = "Suggest a meal from the ingredients you have", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the MCP server exposing the `suggest_meal` tool
    Serve {
        /// Interface to bind (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run the HTTP proxy in front of an MCP server
    Proxy {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        /// MCP endpoint to forward to, including the /mcp path
        #[arg(long)]
        mcp_url: Option<String>,
    },
    /// Run one suggestion locally and print the payload
    Suggest {
        /// Free text listing ingredients, e.g. "I have chicken, rice, tomato"
        context: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    match cli.command {
        Command::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            let suggester = MealSuggester::from_config(&config.mealdb)?;
            info!("Using recipe database at {}", config.mealdb.base_url);
            mcp::serve(McpServer::new(suggester), &format!("{host}:{port}")).await?;
        }
        Command::Proxy {
            host,
            port,
            mcp_url,
        } => {
            let host = host.unwrap_or(config.proxy.host);
            let port = port.unwrap_or(config.proxy.port);
            let mcp_url = mcp_url.unwrap_or(config.proxy.mcp_url);
            proxy::serve(&mcp_url, &format!("{host}:{port}")).await?;
        }
        Command::Suggest { context } => {
            let suggester = MealSuggester::from_config(&config.mealdb)?;
            let outcome = suggester.suggest(&context).await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }

    Ok(())
}
