mod client;
pub mod jsonrpc;
pub mod schema;
mod server;

pub use client::McpClient;
pub use schema::{ToolSchema, SUGGEST_MEAL_TOOL};
pub use server::{serve, McpServer};
pub(crate) use server::health;
