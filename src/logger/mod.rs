//! Logger module
//!
//! Provides logging utilities for the fixture server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;
pub use writer::LogLevel;

use crate::config::{AppState, Config};
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup. An unknown level falls
/// back to `info`.
pub fn init(config: &Config) -> std::io::Result<()> {
    let level = config.logging.level.parse().unwrap_or_else(|e| {
        eprintln!("[WARN] {e}, using info");
        LogLevel::Info
    });
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
        level,
    )
}

/// Write to info/access log
fn write_info(level: LogLevel, message: &str) {
    match writer::get() {
        Some(w) => w.write_info(level, message),
        None if level <= LogLevel::Info => println!("{message}"),
        None => {}
    }
}

/// Write to error log
fn write_error(level: LogLevel, message: &str) {
    match writer::get() {
        Some(w) => w.write_error(level, message),
        None => eprintln!("{message}"),
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, state: &AppState) {
    let config = &state.config;
    let identity = &state.identity;
    write_info(LogLevel::Info, "======================================");
    write_info(LogLevel::Info, "Fixture backend started successfully");
    write_info(LogLevel::Info, &format!("Listening on: http://{addr}"));
    write_info(
        LogLevel::Info,
        &format!(
            "Identity: server_id={} hostname={} port={}",
            identity.server_id, identity.hostname, identity.port
        ),
    );
    write_info(
        LogLevel::Info,
        &format!("Variant: {}", config.identity.variant),
    );
    write_info(LogLevel::Info, &format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(LogLevel::Info, &format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(LogLevel::Info, &format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(LogLevel::Info, &format!("Error log: {path}"));
    }
    write_info(LogLevel::Info, "Routes:");
    for entry in state.routes.iter() {
        let delay = entry
            .delay
            .map(|d| format!(", delay {}ms", d.as_millis()))
            .unwrap_or_default();
        let cacheable = if entry.cache.is_cacheable() {
            "cacheable"
        } else {
            "uncacheable"
        };
        write_info(
            LogLevel::Info,
            &format!("  - GET {:<14} {cacheable}{delay}", entry.path),
        );
    }
    write_info(LogLevel::Info, "======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(
        LogLevel::Debug,
        &format!("[Connection] Accepted from: {peer_addr}"),
    );
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(
        LogLevel::Error,
        &format!("[ERROR] Failed to serve connection: {err:?}"),
    );
}

pub fn log_error(message: &str) {
    write_error(LogLevel::Error, &format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(LogLevel::Warn, &format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_signal(name: &str) {
    write_info(
        LogLevel::Info,
        &format!("\n[SIGNAL] {name} received, initiating graceful shutdown"),
    );
}

pub fn log_server_stopped(addr: &SocketAddr) {
    write_info(
        LogLevel::Info,
        &format!("[SHUTDOWN] Stopped accepting connections on {addr}"),
    );
}
