//! gurume CLI and webhook server entry point.
//!
//! Binary name: `gurume`
//!
//! Parses CLI arguments, loads configuration from the environment, then runs
//! the webhook server or one of the operator commands.

mod cli;
mod http;
mod state;

use anyhow::Context;
use clap::Parser;

use gurume_infra::config::BotConfig;
use gurume_observe::tracing_setup::{LogFormat, TracingOptions, init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&TracingOptions {
        default_filter: cli.default_log_filter().to_string(),
        format: if cli.json_logs {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        },
        enable_otel: cli.otel,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = BotConfig::from_env().context("invalid configuration")?;

    match cli.command {
        Commands::Serve { host, port } => {
            let channel = BotConfig::channel().context("invalid LINE channel configuration")?;
            let state = AppState::init(&config, channel).await?;

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!(%addr, project = %config.project_id, "gurume webhook listening");

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            tracing::info!("server stopped");
        }

        Commands::Search {
            lat,
            lng,
            radius,
            keywords,
        } => {
            cli::search::run(&config, lat, lng, radius, keywords).await?;
        }

        Commands::Favorites { user_id, clear } => {
            cli::favorites::run(&config, &user_id, clear).await?;
        }

        Commands::Query { user_id, clear } => {
            cli::query::run(&config, &user_id, clear).await?;
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
