use anyhow::Context;

use stockkeep_api::app::{build_app, services};
use stockkeep_infra::{AppConfig, InventoryRepository};

/// Exit status that tells a process supervisor not to respawn the worker.
const EXIT_CANNOT_START: i32 = 4;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockkeep_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    tracing::info!("{}", "*".repeat(70));
    tracing::info!("{:*^70}", "  I N V E N T O R Y   S E R V I C E  ");
    tracing::info!("{}", "*".repeat(70));

    let repository = match services::build_repository(&config).await {
        Ok(repo) => repo,
        Err(e) => {
            tracing::error!(error = %e, "cannot continue");
            std::process::exit(EXIT_CANNOT_START);
        }
    };

    let app = build_app(repository.clone());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    repository.close().await;
    tracing::info!("service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
