//! Graceful shutdown handling.

use log::{info, warn};
use tokio_util::sync::CancellationToken;

/// Cancels `token` on Ctrl-C (or SIGTERM on Unix).
///
/// Returns when either a signal arrived or the token was cancelled elsewhere,
/// so the listener task never outlives the server.
pub async fn shutdown_on_signal(token: CancellationToken) {
    tokio::select! {
        _ = wait_for_signal() => {
            info!("Shutdown signal received, draining in-flight requests");
            token.cancel();
        }
        _ = token.cancelled() => {}
    }
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
