use caduceus::api::{app, AppState};
use caduceus::cli::Cli;
use caduceus::config::{self, Config};
use caduceus::ArtifactStore;
use clap::Parser;
use colored::*;
use std::net::SocketAddr;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging with CADUCEUS_LOG environment variable support
    let log_level = match cli.verbose {
        0 => std::env::var("CADUCEUS_LOG").unwrap_or_else(|_| "info".to_string()),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);

        let exit_code = match e.downcast_ref::<caduceus::CaduceusError>() {
            Some(caduceus::CaduceusError::Config(_)) => 2,
            Some(caduceus::CaduceusError::Io(_)) => 3,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => Config::default(),
    };
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(dir) = cli.store_dir {
        config.store.root = dir;
    }

    let store = ArtifactStore::open(&config.store.root)?;
    tracing::info!(root = %store.root().display(), "artifact store ready");

    let addr = SocketAddr::new(config.server.bind.parse()?, config.server.port);
    let state = AppState::new(store, config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {addr}");
    axum::serve(listener, app(state)).await?;
    Ok(())
}
