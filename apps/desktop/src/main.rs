use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vidask_core::{AskClient, config};

mod app;
mod view;

#[derive(Parser)]
#[command(name = "vidask-desktop")]
#[command(about = "Drop a video, ask a question about it, read the answer")]
struct Cli {
    /// Video to open on start
    video: Option<PathBuf>,

    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Inference endpoint, overrides the configuration
    #[arg(short, long)]
    endpoint: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vidask_desktop=info,vidask_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = config::load(cli.config.as_deref(), cli.endpoint)
        .context("failed to load configuration")?;
    let client = AskClient::new(&config)?;

    tracing::info!(endpoint = %client.endpoint(), "vidask desktop starting");

    app::run(client, cli.video)?;
    Ok(())
}
