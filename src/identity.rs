//! Instance identity
//!
//! Every backend instance answers with a fixed `{server_id, hostname, port}`
//! record so a balancer or proxy in front can be observed switching between
//! instances. The record is resolved once at startup and never changes.

use crate::config::Config;
use crate::logger;

/// Port used when no source provides one
pub const DEFAULT_PORT: u16 = 5000;
/// Hostname used when the system lookup fails
pub const FALLBACK_HOSTNAME: &str = "localhost";

/// Environment variable carrying the listen port
pub const PORT_ENV: &str = "PORT";
/// Environment variable carrying the server identifier
pub const SERVER_ID_ENV: &str = "SERVER_ID";

/// Immutable per-process identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub server_id: String,
    pub hostname: String,
    pub port: u16,
}

/// Raw inputs to identity resolution, in no particular order
#[derive(Debug, Default, Clone)]
pub struct IdentitySources {
    /// Positional port argument
    pub cli_port: Option<String>,
    /// `PORT` environment variable
    pub env_port: Option<String>,
    /// `SERVER_ID` environment variable
    pub env_server_id: Option<String>,
    /// `server.port` from the configuration
    pub config_port: Option<String>,
    /// `identity.server_id` from the configuration
    pub config_server_id: Option<String>,
    /// `identity.hostname` from the configuration
    pub config_hostname: Option<String>,
    /// Result of the system hostname lookup
    pub system_hostname: Option<String>,
}

impl IdentitySources {
    /// Collect sources from the running process
    pub fn from_process(cli_port: Option<String>, config: &Config) -> Self {
        Self {
            cli_port,
            env_port: std::env::var(PORT_ENV).ok(),
            env_server_id: std::env::var(SERVER_ID_ENV).ok(),
            config_port: config.server.port.clone(),
            config_server_id: config.identity.server_id.clone(),
            config_hostname: config.identity.hostname.clone(),
            system_hostname: system_hostname(),
        }
    }
}

impl Identity {
    /// Resolve an identity. Never fails: every field has a default.
    ///
    /// Precedence:
    /// * port: CLI argument, `PORT`, `server.port`, [`DEFAULT_PORT`]
    /// * `server_id`: `SERVER_ID`, `identity.server_id`, `server-<port>`
    /// * hostname: `identity.hostname`, system lookup, [`FALLBACK_HOSTNAME`]
    pub fn resolve(sources: &IdentitySources) -> Self {
        let port = parse_port("command line", sources.cli_port.as_deref())
            .or_else(|| parse_port(PORT_ENV, sources.env_port.as_deref()))
            .or_else(|| parse_port("server.port", sources.config_port.as_deref()))
            .unwrap_or(DEFAULT_PORT);

        let server_id = non_empty(sources.env_server_id.as_deref())
            .or_else(|| non_empty(sources.config_server_id.as_deref()))
            .map_or_else(|| format!("server-{port}"), ToString::to_string);

        let hostname = non_empty(sources.config_hostname.as_deref())
            .or_else(|| non_empty(sources.system_hostname.as_deref()))
            .unwrap_or(FALLBACK_HOSTNAME)
            .to_string();

        Self {
            server_id,
            hostname,
            port,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parse a port candidate; unparsable values are skipped with a warning
fn parse_port(source: &str, value: Option<&str>) -> Option<u16> {
    let raw = non_empty(value)?;
    match raw.parse::<u16>() {
        Ok(port) => Some(port),
        Err(e) => {
            logger::log_warning(&format!(
                "Ignoring invalid port '{raw}' from {source}: {e}"
            ));
            None
        }
    }
}

fn system_hostname() -> Option<String> {
    nix::unistd::gethostname()
        .ok()
        .and_then(|name| name.into_string().ok())
}
