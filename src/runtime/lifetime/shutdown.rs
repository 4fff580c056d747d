use tokio::signal;
use tracing::{info, warn};

/// Wait for Ctrl+C
///
/// Nothing is buffered between requests, so shutdown only has to stop
/// accepting connections.
pub async fn listen_for_shutdown() {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, stopping server...");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }
}
