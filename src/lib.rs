//! Suggest a meal from the ingredients you have.
//!
//! The crate exposes a single MCP tool, `suggest_meal`, backed by the public
//! [TheMealDB](https://www.themealdb.com) API, plus a plain HTTP proxy in
//! front of it and a small MCP client.
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let outcome = meal_mcp::suggest_meal("I have chicken, rice, tomato").await?;
//! println!("{}", serde_json::to_string_pretty(&outcome)?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod gateway;
pub mod mcp;
pub mod model;
pub mod proxy;
pub mod scoring;
pub mod suggest;

pub use config::AppConfig;
pub use error::{MealError, Result};
pub use extract::extract_ingredients;
pub use gateway::{MealDbGateway, RecipeGateway};
pub use mcp::{McpClient, McpServer};
pub use model::{Candidate, RecipeDetail, RecipeResponse, SuggestOutcome};
pub use suggest::{MealSuggester, MealSuggesterBuilder};

/// Suggest a meal using TheMealDB with default settings
pub async fn suggest_meal(context: &str) -> Result<SuggestOutcome> {
    let suggester = MealSuggester::builder().build()?;
    Ok(suggester.suggest(context).await)
}

/// Resolves on Ctrl-C; used for graceful server shutdown
pub(crate) async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}
