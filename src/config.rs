use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Top-level configuration for the tool server, proxy and recipe gateway
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Upstream recipe database settings
    #[serde(default)]
    pub mealdb: MealDbConfig,
    /// MCP server listener
    #[serde(default)]
    pub server: ServerConfig,
    /// HTTP proxy listener and the MCP endpoint it forwards to
    #[serde(default)]
    pub proxy: ProxyConfig,
}

/// Configuration for the TheMealDB gateway
#[derive(Debug, Deserialize, Clone)]
pub struct MealDbConfig {
    /// Base URL of the JSON API, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// How many search candidates are scored at most
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
}

impl MealDbConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for MealDbConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_candidates: default_max_candidates(),
        }
    }
}

/// Listener for the MCP server
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_server_port(),
        }
    }
}

/// Listener for the HTTP proxy
#[derive(Debug, Deserialize, Clone)]
pub struct ProxyConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_proxy_port")]
    pub port: u16,
    /// MCP endpoint the proxy calls, including the `/mcp` path
    #[serde(default = "default_mcp_url")]
    pub mcp_url: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_proxy_port(),
            mcp_url: default_mcp_url(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://www.themealdb.com/api/json/v1/1".to_string()
}

fn default_timeout_secs() -> u64 {
    6
}

fn default_max_candidates() -> usize {
    25
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8000
}

fn default_proxy_port() -> u16 {
    8080
}

fn default_mcp_url() -> String {
    "http://127.0.0.1:8000/mcp".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with MEALMCP__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: MEALMCP__MEALDB__TIMEOUT_SECS
    pub fn load() -> crate::Result<Self> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the precedence rules.
pub fn load_config() -> crate::Result<AppConfig> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: MEALMCP__SERVER__PORT
        .add_source(
            Environment::with_prefix("MEALMCP")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
