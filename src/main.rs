// src/main.rs
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum_server::Handle;
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use polls::config::Config;
use polls::db::{self, PgStore};
use polls::{MemoryStore, PollStore};

#[derive(Debug, Parser)]
#[command(author, version, about = "Polls: questions, choices and votes over HTTP")]
struct Cli {
    /// Address to listen on. Defaults to HOST:PORT from the environment.
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Keep everything in memory instead of connecting to DATABASE_URL.
    #[arg(long)]
    memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let mut config = Config::from_env(!cli.memory).context("invalid configuration")?;
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }

    let store: Arc<dyn PollStore> = match &config.database {
        Some(database) => {
            let pool = db::create_pool(database)
                .await
                .context("failed to connect to the database")?;
            Arc::new(PgStore::new(pool))
        }
        None => {
            info!("using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let app = polls::build_app(store, config.index_limit).context("failed to load templates")?;

    let handle = Handle::new();
    tokio::spawn(shutdown_signal(handle.clone()));

    info!(address = %config.bind, "server running");
    axum_server::bind(config.bind)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .context("server error")?;

    info!("server shut down");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("polls=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal(handle: Handle) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install signal handler");
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

    info!("shutting down");
    handle.graceful_shutdown(Some(Duration::from_secs(10)));
}
