//! Solana tip blink service.
//!
//! Serves one action endpoint: GET/OPTIONS describe a SOL tip, POST returns
//! an unsigned transfer for the posting wallet to sign.
//!
//! ```text
//!                 ┌──────────────────────── tip-blink ─────────────────────────┐
//!   Client ──────▶│ http::server ──▶ http::handlers ──▶ action (validate)      │
//!                 │                        │                                   │
//!                 │                        ├──▶ pricing  ──▶ price oracle API  │
//!                 │                        └──▶ blockchain ──▶ Solana RPC      │
//!                 └────────────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use tip_blink::config::{load_config, BlinkConfig};
use tip_blink::lifecycle::{prepare_state, signals, Shutdown};
use tip_blink::observability::{logging, metrics};
use tip_blink::HttpServer;

#[derive(Parser)]
#[command(name = "tip-blink")]
#[command(about = "Solana tip action endpoint", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => BlinkConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "tip-blink starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        cluster = %config.ledger.cluster,
        legacy_error_status = config.action.legacy_error_status,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let bind_address = config.listener.bind_address.clone();
    let state = prepare_state(config).await?;

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown.clone());

    HttpServer::new(state).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
