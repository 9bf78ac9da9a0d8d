//! # Box-Ledger Inventory Runtime
//!
//! Serves the chat webhook that drives per-lot remaining box counts.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG`, default `info`)
//! 2. Load configuration from the environment
//! 3. Check the webhook secret is configured
//! 4. Lock the data directory and wire subsystems
//! 5. Serve until Ctrl-C

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use inventory_runtime::{load_config, InventoryRuntime};

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config();
    if let Err(e) = config.validate_for_production() {
        warn!("{e}");
    }

    info!("Starting inventory runtime");
    let runtime = InventoryRuntime::new(config)?;
    runtime
        .serve(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            info!("Shutdown signal received");
        })
        .await?;

    info!("Inventory runtime stopped");
    Ok(())
}
