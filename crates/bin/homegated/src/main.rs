//! # homegated — homegate daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars) and install the log subscriber
//! - Open the JSON device store
//! - Construct the connection registry and application services
//! - Run an initial discovery scan in the background
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve until Ctrl-C
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer. No domain logic belongs here.

mod config;

use std::sync::Arc;

use homegate_adapter_http_axum::router;
use homegate_adapter_http_axum::state::AppState;
use homegate_adapter_storage_json::JsonFileDeviceRepository;
use homegate_adapter_virtual::VirtualDiscovery;
use homegate_app::registry::ConnectionRegistry;
use homegate_app::services::{CommandDispatcher, DeviceService, DiscoveryService};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Storage
    let device_repo = JsonFileDeviceRepository::open(&config.storage.data_dir).await?;
    tracing::info!(path = %device_repo.path().display(), "device store opened");

    // Connections
    let registry = Arc::new(ConnectionRegistry::new(
        config.capabilities(),
        config.latency(),
    ));

    // Services
    let dispatcher = Arc::new(CommandDispatcher::new(Arc::clone(&registry)));
    let device_service = Arc::new(DeviceService::new(device_repo));
    let discovery_service = Arc::new(DiscoveryService::new(
        VirtualDiscovery::new(config.scan_delay()),
        registry,
    ));

    // Initial scan, so actions work without a prior discover request
    let initial_scan = Arc::clone(&discovery_service);
    tokio::spawn(async move {
        if let Err(err) = initial_scan.scan().await {
            tracing::error!(error = %err, "initial discovery scan failed");
        }
    });

    // HTTP
    let state = AppState::from_arcs(dispatcher, device_service, discovery_service);
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "homegated listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("homegated stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "unable to listen for shutdown signal");
    }
    tracing::info!("shutdown signal received");
}
