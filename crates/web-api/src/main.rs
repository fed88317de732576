#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

//! HTTP server exposing the privileged training-log mutations.

mod error;
mod routes;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ferrum_domain::Service;
use ferrum_storage::Store;

use crate::routes::ApiRoutes;

#[derive(Parser, Debug)]
#[command(name = "ferrum-web-api", about = "Administrative API for the training log")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:8080", env = "FERRUM_LISTEN")]
    listen: String,

    /// Base URL of the REST store.
    #[arg(long, env = "FERRUM_STORE_URL")]
    store_url: Option<String>,

    /// API key for the REST store.
    #[arg(long, env = "FERRUM_STORE_KEY")]
    store_key: Option<String>,

    /// Serve from a transient in-memory store instead of the REST store.
    #[arg(long)]
    memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let store = if args.memory {
        info!("using in-memory store, data will not survive a restart");
        Store::memory()
    } else {
        let url = args
            .store_url
            .context("--store-url is required unless --memory is set")?;
        let key = args
            .store_key
            .context("--store-key is required unless --memory is set")?;
        Store::rest(&url, &key)?
    };

    let router = ApiRoutes::router(Arc::new(Service::new(store)));

    let listener = TcpListener::bind(&args.listen)
        .await
        .with_context(|| format!("failed to bind {}", args.listen))?;
    info!("listening on {}", args.listen);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {error}");
    }
}
