#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::cargo)]
#![warn(clippy::perf)]
#![warn(clippy::complexity)]
#![warn(clippy::style)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use config::{Config, DEFAULT_CONFIG_PATH};
use playlist::{StreamEntry, serialize_playlist};
use sources::{collect_local_entries, collect_remote_entries};
use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use util::{init_http_client, spawn_ct_watcher};

pub mod config;
pub mod playlist;
pub mod sources;
pub mod util;

/// Merges the Init7 TV channel list and local go2rtc streams into one M3U playlist
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Where to write the playlist (defaults to `output.filename` from the configuration)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = Config::load(&args.config).await?;

    let ct = CancellationToken::new();
    spawn_ct_watcher(ct.clone());

    info!("Generating M3U playlist");
    let client = init_http_client()?;

    let mut entries = select! {
        () = ct.cancelled() => bail!("Interrupted while loading Init7 streams"),
        r = collect_remote_entries(&client, &config.init7) => r?,
    };
    entries.extend(collect_local_entries(&config.go2rtc));

    let output_path = args.output.unwrap_or(config.output.filename);
    write_output(&output_path, &entries).await?;

    info!("All done successfully!");

    Ok(())
}

/// Serializes every entry and writes the playlist file
#[instrument(skip(entries))]
async fn write_output(path: &Path, entries: &[StreamEntry]) -> Result<()> {
    tokio::fs::write(path, serialize_playlist(entries))
        .await
        .with_context(|| format!("Writing playlist to {}", path.display()))?;

    info!("Playlist saved to {} with {} streams", path.display(), entries.len());

    Ok(())
}
