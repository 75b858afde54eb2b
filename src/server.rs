//! HTTP server startup.

use anyhow::{Context, Result};
use mordecai_dashboard::api::{self, AppState};
use mordecai_dashboard::config::DashboardConfig;

/// Bind to the configured address and serve until ctrl-c.
pub async fn serve(config: DashboardConfig) -> Result<()> {
    let bind_addr = config.bind_addr();
    let data_dir = config.resolved_data_dir();

    if !data_dir.is_dir() {
        tracing::warn!(
            data_dir = %data_dir.display(),
            "data directory does not exist yet; endpoints will report empty data"
        );
    }

    let router = api::router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(
        addr = %bind_addr,
        data_dir = %data_dir.display(),
        "dashboard listening at http://{bind_addr}/"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("shutting down dashboard server");
        })
        .await?;

    Ok(())
}
