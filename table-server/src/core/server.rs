use crate::api;
use crate::core::{Config, Result, ServerState};
use crate::offers;

/// HTTP server
pub struct Server {
    config: Config,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Initialize state and serve until Ctrl+C
    pub async fn run(self) -> Result<()> {
        let state = ServerState::initialize(&self.config).await?;

        if self.config.reconcile_on_startup {
            match offers::reconcile(&state.pool).await {
                Ok(report) if report.is_clean() => {
                    tracing::info!("Special offer mirrors consistent");
                }
                Ok(report) => {
                    tracing::warn!(
                        created = report.created,
                        relinked = report.relinked,
                        resynced = report.resynced,
                        orphans_removed = report.orphans_removed,
                        "Special offer mirrors repaired"
                    );
                }
                Err(e) => tracing::error!("Special offer reconciliation failed: {e}"),
            }
        }

        let app = api::build_app(&state);

        let addr = format!("0.0.0.0:{}", self.config.http_port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!("table-server HTTP listening on {addr}");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {e}"),
    }
}
