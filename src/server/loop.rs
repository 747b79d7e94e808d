// Server loop module
// Accepts connections until shutdown is requested, then drains

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{watch, Notify};

use super::connection::accept_connection;
use crate::config;
use crate::logger;

/// How long in-flight connections get to finish after shutdown
const DRAIN_GRACE: Duration = Duration::from_secs(5);
const DRAIN_POLL: Duration = Duration::from_millis(50);

/// Accept loop for the fixture server
///
/// Runs until `shutdown` is notified. Open connections are then asked to
/// close once their current response is written, and given [`DRAIN_GRACE`]
/// to do so before the function returns.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<config::AppState>,
    shutdown: Arc<Notify>,
) -> std::io::Result<()> {
    let local_addr = listener.local_addr()?;
    let active_connections = Arc::new(AtomicUsize::new(0));
    let (stopping_tx, stopping_rx) = watch::channel(false);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(
                            stream,
                            peer_addr,
                            &state,
                            &active_connections,
                            &stopping_rx,
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => break,
        }
    }

    drop(listener);
    logger::log_server_stopped(&local_addr);
    stopping_tx.send_replace(true);
    drain_connections(&active_connections).await;
    Ok(())
}

/// Wait for active connections to reach zero, up to [`DRAIN_GRACE`]
async fn drain_connections(active_connections: &AtomicUsize) {
    let deadline = tokio::time::Instant::now() + DRAIN_GRACE;
    loop {
        let remaining = active_connections.load(Ordering::SeqCst);
        if remaining == 0 {
            return;
        }
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Shutting down with {remaining} connection(s) still open"
            ));
            return;
        }
        tokio::time::sleep(DRAIN_POLL).await;
    }
}
