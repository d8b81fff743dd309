// Configuration module entry point
// Layers an optional config file and FSROUTE__* environment variables over defaults

mod types;

use std::net::SocketAddr;
use std::time::Duration;

pub use types::{FunctionsConfig, LoggingConfig, RuntimeConfig, ServerConfig};

/// Config file looked up by [`RuntimeConfig::load`]
pub const DEFAULT_CONFIG_FILE: &str = "fsroute.toml";

impl RuntimeConfig {
    /// Load configuration from the default file, if present
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from the given file path; a missing file is not an error
    ///
    /// Environment variables override the file, e.g. `FSROUTE__SERVER__PORT=8080`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_with_env(config_path, environment())
    }

    fn load_with_env(config_path: &str, env: config::Environment) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(env)
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    pub const fn invocation_timeout(&self) -> Duration {
        Duration::from_millis(self.functions.invocation_timeout_ms)
    }

    pub const fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.server.connection_timeout_secs)
    }
}

/// `FSROUTE__SECTION__KEY` variables; list keys take comma-separated values
fn environment() -> config::Environment {
    config::Environment::with_prefix("FSROUTE")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("functions.extensions")
}
