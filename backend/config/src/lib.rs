//! Runtime configuration, read once from the environment at startup.

use std::collections::HashMap;

use serde::Deserialize;

/// salamgate runtime configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Hosted model API key. Absence is fatal at provider construction.
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible endpoint
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Max history messages submitted per model request
    pub context_window: usize,
    /// Log level
    pub log_level: String,
    /// Directory for rolling log files
    pub log_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            model: "gemini-2.0-flash".to_string(),
            context_window: 40,
            log_level: "info".to_string(),
            log_dir: "logs".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        Self::from_env_map(&std::env::vars().collect())
    }

    /// Load from a provided map (useful for testing).
    pub fn from_env_map(env: &HashMap<String, String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| env.get(key).filter(|v| !v.is_empty()).cloned();

        Self {
            bind_address: get("SALAMGATE_BIND").unwrap_or(defaults.bind_address),
            port: get("SALAMGATE_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            api_key: get("GEMINI_API_KEY"),
            base_url: get("SALAMGATE_BASE_URL").unwrap_or(defaults.base_url),
            model: get("SALAMGATE_MODEL").unwrap_or(defaults.model),
            context_window: get("SALAMGATE_CONTEXT_WINDOW")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.context_window),
            log_level: get("SALAMGATE_LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: get("SALAMGATE_LOG_DIR").unwrap_or(defaults.log_dir),
        }
    }
}
