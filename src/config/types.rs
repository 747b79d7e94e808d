// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub identity: IdentityConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub latency: LatencyConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    /// Kept raw so the identity resolver can skip an unparsable value
    #[serde(default)]
    pub port: Option<String>,
    #[serde(default)]
    pub workers: Option<usize>,
    /// Allow several instances to share one port (`SO_REUSEPORT`)
    pub reuse_port: bool,
}

/// Which tutorial backend this instance stands in for
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Variant {
    ReverseProxy,
    LoadBalancer,
    SslTermination,
    Caching,
    Compose,
    /// Union of every route
    #[default]
    All,
}

impl Variant {
    /// Delay applied to `/api/data` when `latency.data_delay_ms` is unset
    pub const fn default_data_delay_ms(self) -> u64 {
        match self {
            Self::Caching | Self::All => 100,
            Self::ReverseProxy | Self::LoadBalancer | Self::SslTermination | Self::Compose => 0,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::ReverseProxy => "reverse_proxy",
            Self::LoadBalancer => "load_balancer",
            Self::SslTermination => "ssl_termination",
            Self::Caching => "caching",
            Self::Compose => "compose",
            Self::All => "all",
        };
        f.write_str(name)
    }
}

/// Identity overrides
#[derive(Debug, Deserialize, Clone, Default)]
pub struct IdentityConfig {
    #[serde(default)]
    pub variant: Variant,
    #[serde(default)]
    pub server_id: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    #[serde(default)]
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    /// Emit `Cache-Control` headers per route
    pub cache_headers: bool,
}

/// Artificial latency configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct LatencyConfig {
    /// Overrides the variant's default `/api/data` delay; 0 disables it
    #[serde(default)]
    pub data_delay_ms: Option<u64>,
}
