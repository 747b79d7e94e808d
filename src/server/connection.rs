// Connection handling module
// Accepts a TCP connection and serves it on its own task

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};
use tokio::sync::watch;

use crate::config;
use crate::handler;
use crate::logger;

/// Accept and process a connection, checking limits and logging.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address
/// * `state` - Shared application state
/// * `conn_counter` - Active connection counter
/// * `shutdown` - Changes once when the server stops
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: &Arc<config::AppState>,
    conn_counter: &Arc<AtomicUsize>,
    shutdown: &watch::Receiver<bool>,
) {
    // Increment counter first, then check limit (prevents race condition)
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            // Exceeded limit: rollback counter and reject
            conn_counter.fetch_sub(1, Ordering::SeqCst);
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection rejected."
            ));
            drop(stream);
            return;
        }
    }

    logger::log_connection_accepted(&peer_addr);

    handle_connection(
        stream,
        peer_addr,
        Arc::clone(state),
        Arc::clone(conn_counter),
        shutdown.clone(),
    );
}

/// Idle time allowed before a request's headers arrive
///
/// Keep-alive connections wait up to `keep_alive_timeout` between requests.
/// With keep-alive off, `read_timeout` bounds the single request instead.
fn header_timeout(performance: &config::PerformanceConfig) -> Duration {
    let secs = if performance.keep_alive_timeout > 0 {
        performance.keep_alive_timeout
    } else {
        performance.read_timeout
    };
    Duration::from_secs(secs)
}

/// Handle a single connection in a spawned task.
///
/// This function:
/// 1. Wraps the TCP stream in `TokioIo`
/// 2. Configures HTTP/1.1 keep-alive and the header read timeout
/// 3. Serves the connection with the request handler
/// 4. Asks hyper to close the connection once shutdown is signalled
/// 5. Decrements connection counter when done
///
/// Each connection runs on its own task, so a delayed request never holds
/// up requests on other connections.
fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: Arc<config::AppState>,
    conn_counter: Arc<AtomicUsize>,
    mut shutdown: watch::Receiver<bool>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);
        let performance = &state.config.performance;

        let mut builder = http1::Builder::new();
        builder
            .timer(TokioTimer::new())
            .keep_alive(performance.keep_alive_timeout > 0)
            .header_read_timeout(header_timeout(performance));

        let handler_state = Arc::clone(&state);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                handler::handle_request(req, Arc::clone(&handler_state), peer_addr)
            }),
        );
        tokio::pin!(conn);

        let result = tokio::select! {
            result = conn.as_mut() => result,
            _ = shutdown.changed() => {
                // Finishes an in-flight response, then closes
                conn.as_mut().graceful_shutdown();
                conn.as_mut().await
            }
        };

        if let Err(err) = result {
            if err.is_timeout() {
                logger::log_warning(&format!(
                    "Connection from {peer_addr} idle for {} seconds, closing",
                    header_timeout(performance).as_secs()
                ));
            } else {
                logger::log_connection_error(&err);
            }
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{test_config, Variant};

    #[test]
    fn test_header_timeout_follows_keep_alive() {
        let mut performance = test_config(Variant::All).performance;
        performance.keep_alive_timeout = 75;
        performance.read_timeout = 30;
        assert_eq!(header_timeout(&performance), Duration::from_secs(75));

        performance.keep_alive_timeout = 0;
        assert_eq!(header_timeout(&performance), Duration::from_secs(30));
    }
}
