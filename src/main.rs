use clap::Parser;
use std::sync::Arc;
use tokio::sync::Notify;

mod config;
mod handler;
mod http;
mod identity;
mod logger;
mod routing;
mod server;

use identity::{Identity, IdentitySources};

/// JSON backend used behind reverse proxy, load balancer, TLS and cache demos
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Port to listen on (overrides PORT and the config file)
    port: Option<String>,

    /// Config file path without extension
    #[arg(short, long, default_value = "fixture")]
    config: String,

    /// Which tutorial backend to reproduce
    #[arg(long, value_enum)]
    variant: Option<config::Variant>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut cfg = config::Config::load_from(&cli.config)?;
    if let Some(variant) = cli.variant {
        cfg.identity.variant = variant;
    }

    logger::init(&cfg)?;

    let identity = Identity::resolve(&IdentitySources::from_process(cli.port, &cfg));

    // Worker threads default to the number of CPU cores
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg, identity))
}

async fn async_main(
    cfg: config::Config,
    identity: Identity,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr(identity.port)?;
    let listener = server::create_listener(addr, cfg.server.reuse_port)
        .map_err(|e| format!("Failed to bind {addr}: {e}"))?;

    let state = Arc::new(config::AppState::new(cfg, identity));
    logger::log_server_start(&addr, &state);

    let shutdown = Arc::new(Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown));

    server::start_server_loop(listener, state, shutdown).await?;
    Ok(())
}
