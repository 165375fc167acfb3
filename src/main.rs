//! ytdl-web server binary.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use ytdl_web::{Config, Result, VideoDownloader};

/// Minimal web front-end for downloading single videos through yt-dlp
#[derive(Parser, Debug)]
#[command(name = "ytdl-web", version, about)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind the web server to (overrides config)
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Directory to store downloaded files in (overrides config)
    #[arg(short, long)]
    download_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_toml_file(path)?,
        None => Config::default(),
    };
    if let Some(bind) = cli.bind {
        config.api.bind_address = bind;
    }
    if let Some(dir) = cli.download_dir {
        config.download.download_dir = dir;
    }

    tracing::info!(
        bind = %config.api.bind_address,
        download_dir = %config.download.download_dir.display(),
        "starting ytdl-web"
    );

    let downloader = Arc::new(VideoDownloader::new(config)?);
    let api_handle = downloader.spawn_api_server();

    // Runs until SIGTERM/SIGINT, then lets an in-flight job finish
    ytdl_web::run_with_shutdown((*downloader).clone()).await?;

    api_handle.abort();
    Ok(())
}
