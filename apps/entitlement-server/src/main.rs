//! Entitlements REST API server

mod app;
mod config;
mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use config::AppConfig;
use entitlement_service::EntitlementServiceModule;
use sea_orm::Database;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "entitlement-server", version, about = "Entitlements REST API server")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Run database migrations and exit
    #[arg(long)]
    migrate_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    if cli.print_config {
        let mut printable = config.clone();
        printable.database.url = config.database.redacted_url();
        println!("{}", serde_json::to_string_pretty(&printable)?);
        return Ok(());
    }

    telemetry::init_tracing(&config.logging)?;

    info!(
        environment = %config.server.environment,
        database = %config.database.redacted_url(),
        max_connections = config.database.max_connections,
        "Starting entitlement server"
    );

    let db = Database::connect(config.database.connect_options())
        .await
        .context("failed to create database pool")?;

    if let Err(err) = db.ping().await {
        error!(error = %err, "Database connection failed");
        return Err(err).context("database connection check failed");
    }
    info!("Database connection established");

    let module = EntitlementServiceModule::new(config.module_config());
    if config.database.run_migrations || cli.migrate_only {
        module.migrate(&db).await.context("failed to run migrations")?;
    }
    if cli.migrate_only {
        db.close().await.context("failed to close database pool")?;
        return Ok(());
    }

    module.init(Arc::new(db.clone()))?;
    let app = app::build_router(&module, &config)?;

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;

    info!(
        bind_addr = %config.server.bind_addr,
        api_version = %config.server.api_version,
        "Entitlement server listening"
    );

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            shutdown_signal().await;
            info!("Shutdown signal received");
            cancel.cancel();
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .context("server error")?;

    db.close().await.context("failed to close database pool")?;
    info!("Entitlement server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install ctrl+c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install sigterm handler");
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
