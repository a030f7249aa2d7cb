use thiserror::Error;

/// Errors that can occur outside the fail-soft suggestion path
#[derive(Error, Debug)]
pub enum MealError {
    /// HTTP request to the MCP server failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The MCP server answered with a JSON-RPC error object
    #[error("MCP error {code}: {message}")]
    RpcError { code: i32, message: String },

    /// The MCP server answered with something that is not a tool result
    #[error("Invalid tool response: {0}")]
    InvalidResponse(String),

    /// JSON (de)serialization failed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Socket or listener error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MealError>;
