// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct RuntimeConfig {
    pub server: ServerConfig,
    pub functions: FunctionsConfig,
    pub logging: LoggingConfig,
}

/// Listener configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    /// 0 binds an ephemeral port
    pub port: u16,
    /// Tokio worker threads; runtime default when unset
    pub workers: Option<usize>,
    pub keep_alive: bool,
    /// Upper bound on a single connection's lifetime
    pub connection_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            workers: None,
            keep_alive: true,
            connection_timeout_secs: 60,
        }
    }
}

/// Function discovery and invocation
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct FunctionsConfig {
    /// Directory scanned for handler sources
    pub root: String,
    /// Handler source extensions, without the dot
    pub extensions: Vec<String>,
    pub invocation_timeout_ms: u64,
}

impl Default for FunctionsConfig {
    fn default() -> Self {
        Self {
            root: "api".to_string(),
            extensions: vec!["rs".to_string()],
            invocation_timeout_ms: 3000,
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    pub error_log_file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            access_log: true,
            access_log_format: "combined".to_string(),
            access_log_file: None,
            error_log_file: None,
        }
    }
}
