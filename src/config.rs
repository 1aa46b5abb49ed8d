//! Pulseboard configuration management

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main Pulseboard configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PulseboardConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Remote analytics backend configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Completion API configuration for sample generation
    #[serde(default)]
    pub ai: AiConfig,
}

impl PulseboardConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8990,
        }
    }
}

/// Remote analytics backend configuration
///
/// When `base_url` is unset, chart and overview endpoints skip the backend
/// call and serve fallback data immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the analytics backend (e.g. `http://localhost:5001`)
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 5,
        }
    }
}

/// Completion API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// API key; falls back to the `OPENAI_API_KEY` environment variable
    pub api_key: Option<String>,

    /// Base URL of the chat-completions API
    pub base_url: String,

    /// Model name
    pub model: String,

    /// Maximum completion tokens
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 150,
            temperature: 0.8,
            timeout_secs: 10,
        }
    }
}

impl AiConfig {
    /// Resolve the API key from config or environment
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
    }
}
