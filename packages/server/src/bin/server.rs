//! Chat session hub server.
//!
//! Tracks online users, relays chat messages and typing signals, and replays
//! recent history to newly connected sessions.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kaiwa-server
//! cargo run --bin kaiwa-server -- --host 0.0.0.0 --port 3000
//! KAIWA_HISTORY_LIMIT=20 cargo run --bin kaiwa-server
//! ```

use std::sync::Arc;

use clap::Parser;
use kaiwa_server::{config::ServerConfig, infrastructure::store::InMemoryMessageStore, ui::Server};
use kaiwa_shared::{logger::setup_logger, time::SystemClock};

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = ServerConfig::parse();
    tracing::debug!("Starting with {:?}", config);

    let clock = Arc::new(SystemClock);
    let store = Arc::new(InMemoryMessageStore::new(clock.clone()));

    if let Err(e) = Server::new(config, store, clock).run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
