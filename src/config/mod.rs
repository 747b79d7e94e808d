// Configuration module entry point
// Loads startup configuration and holds the shared application state

mod state;
mod types;

use std::net::SocketAddr;
use std::time::Duration;

// Re-export public types
pub use state::AppState;
pub use types::{Config, PerformanceConfig, Variant};

impl Config {
    /// Load configuration from specified file path (without extension)
    /// The file is optional; `FIXTURE_*` environment variables override it
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("FIXTURE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.reuse_port", false)?
            .set_default("identity.variant", "all")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "fixture-backend/0.1")?
            .set_default("http.cache_headers", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self, port: u16) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Artificial delay for `/api/data`, `None` when disabled
    pub fn data_delay(&self) -> Option<Duration> {
        let ms = self
            .latency
            .data_delay_ms
            .unwrap_or_else(|| self.identity.variant.default_data_delay_ms());
        (ms > 0).then_some(Duration::from_millis(ms))
    }
}

#[cfg(test)]
pub(crate) fn test_config(variant: Variant) -> Config {
    use types::{HttpConfig, IdentityConfig, LatencyConfig, LoggingConfig, ServerConfig};

    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: None,
            workers: None,
            reuse_port: false,
        },
        identity: IdentityConfig {
            variant,
            server_id: None,
            hostname: None,
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            access_log: false,
            access_log_format: "combined".to_string(),
            access_log_file: None,
            error_log_file: None,
        },
        performance: PerformanceConfig {
            keep_alive_timeout: 75,
            read_timeout: 30,
            write_timeout: 30,
            max_connections: None,
        },
        http: HttpConfig {
            server_name: "fixture-backend/test".to_string(),
            cache_headers: true,
        },
        latency: LatencyConfig::default(),
    }
}
