use tokio::signal;
use tracing::{info, warn};

/// Resolves on Ctrl+C or SIGTERM, whichever comes first.
pub async fn axum_shutdown_signal() {
	let ctrl_c = async {
		if let Err(e) = signal::ctrl_c().await {
			warn!("Failed to listen for Ctrl+C: {e}");
			std::future::pending::<()>().await;
		}
	};

	#[cfg(unix)]
	let terminate = async {
		match signal::unix::signal(signal::unix::SignalKind::terminate()) {
			Ok(mut terminate) => {
				terminate.recv().await;
			}
			Err(e) => {
				warn!("Failed to listen for SIGTERM: {e}");
				std::future::pending::<()>().await;
			}
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		() = ctrl_c => info!("Received Ctrl+C, shutting down gracefully..."),
		() = terminate => info!("Received SIGTERM, shutting down gracefully..."),
	}
}
