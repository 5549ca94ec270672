//! folio — personal portfolio page server.
//!
//!   folio [--listen <addr>]   → serve the portfolio page
//!
//! Credentials come from flags, the environment or a `.env` file.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use folio::config::{Cli, Config};
use folio::github::GitHubClient;
use folio::notifier::Notifier;
use folio::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; flags and the real environment still apply.
    let _ = dotenv::dotenv();

    let cli = Cli::parse();
    folio::logging::init_tracing(&cli.log_level, &cli.log_format)?;

    let config = Arc::new(Config::try_from(cli).context("invalid configuration")?);

    let source = GitHubClient::new(&config.github).context("failed to build GitHub client")?;
    let notifier = Notifier::smtp(&config.mail).context("failed to configure mail relay")?;
    tracing::info!(
        "serving portfolio for github user {} (mail relay {}:{})",
        config.github.username,
        config.mail.smtp_host,
        config.mail.smtp_port
    );

    let state = AppState {
        config: Arc::clone(&config),
        source: Arc::new(source),
        notifier: Arc::new(notifier),
    };
    let app = server::router(state);

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.listen))?;
    tracing::info!("listening on http://{}", config.listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down gracefully");
        },
    }
}
