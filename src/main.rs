//! Command-line entry point that serves the profit-sharing HTTP API.

use std::path::PathBuf;

use clap::Parser;
use profit_sharing_engine::api::{AppState, create_router};
use profit_sharing_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "profit-sharing-engine",
    about = "Serve per-project profit-sharing calculations over HTTP",
    version
)]
struct Cli {
    /// Directory holding engine.yaml and the projects/ rule files
    #[arg(long, default_value = "./config/default")]
    config: PathBuf,
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    /// Port to bind the HTTP server to
    #[arg(long, default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init()?;

    let config = ConfigLoader::load(&cli.config)?;
    let router = create_router(AppState::new(config));

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Profit-sharing engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
