use tokio::signal;
use tracing::{error, warn};

/// Waits for Ctrl+C. If the handler cannot be installed, returns at once
/// so the caller proceeds to an orderly shutdown.
pub async fn wait_for_shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => warn!("Shutdown signal received, stopping link engine..."),
        Err(e) => error!("Failed to listen for Ctrl+C: {}", e),
    }
}
