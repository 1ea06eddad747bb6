use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use ccs_engine::api::{AppState, create_router};
use ccs_engine::config::ConfigLoader;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "ccs-engine",
    about = "Child Care Subsidy estimation API",
    version
)]
struct Cli {
    /// Directory holding the rate schedule YAML files.
    #[arg(short, long, default_value = "./config/2025-26")]
    config_dir: PathBuf,
    /// Address to listen on.
    #[arg(short, long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    let config = ConfigLoader::load(&cli.config_dir)
        .with_context(|| format!("loading rate schedule from {}", cli.config_dir.display()))?;
    let metadata = &config.rates().metadata;
    info!(
        version = %metadata.version,
        financial_year = %metadata.financial_year,
        effective_date = %metadata.effective_date,
        "Rate schedule loaded"
    );

    let app = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    info!("Listening on http://{}", cli.bind);
    axum::serve(listener, app).await?;
    Ok(())
}
