use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};

use seed_inventory as app;

/// Seed inventory web server
#[derive(Debug, Parser)]
#[command(name = "seed-inventory", version, about)]
struct Cli {
    /// Override the configured SQLite URL
    #[arg(long)]
    database_url: Option<String>,

    /// Override the configured listen port
    #[arg(long)]
    port: Option<u16>,

    /// Apply migrations and exit without serving
    #[arg(long)]
    migrate_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = app::config::load_config().context("failed to load configuration")?;
    if let Some(url) = cli.database_url {
        cfg.database_url = url;
    }
    if let Some(port) = cli.port {
        cfg.port = port;
    }
    app::config::init_tracing(cfg.log_level(), cfg.log_json);

    // Init DB
    let db_pool = app::db::establish_connection_from_app_config(&cfg)
        .await
        .with_context(|| format!("failed to connect to {}", cfg.database_url()))?;
    if cfg.auto_migrate || cli.migrate_only {
        app::db::run_migrations(&db_pool).await.map_err(|e| {
            error!("Failed running migrations: {}", e);
            e
        })?;
    }

    if cli.migrate_only {
        info!("Migrations applied; exiting");
        app::db::close_pool(db_pool).await?;
        return Ok(());
    }

    let db_arc = Arc::new(db_pool);
    let seeds = Arc::new(app::repositories::SeaOrmSeedRepository::new(db_arc.clone()));
    let app_state = app::AppState::new(seeds, cfg.clone());
    let router = app::build_router(app_state);

    // Bind and serve
    let addr: SocketAddr = format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", cfg.host, cfg.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(
        environment = %cfg.environment,
        "seed-inventory listening on http://{}", addr
    );

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    // The router and its state are gone, so this should be the last handle.
    match Arc::try_unwrap(db_arc) {
        Ok(pool) => app::db::close_pool(pool).await?,
        Err(_) => warn!("Database pool still shared at shutdown; leaving it to drop"),
    }
    info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
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
    info!("Shutdown signal received");
}
