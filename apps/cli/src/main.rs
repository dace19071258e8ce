use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vidask_core::{AskClient, Failure, SelectedFile, Session, config};

/// Quieter than the desktop default so log lines do not break the spinner
const DEFAULT_LOG_FILTER: &str = "vidask=warn,vidask_core=warn";

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

#[derive(Parser)]
#[command(name = "vidask")]
#[command(about = "Ask a question about a video file and print the answer")]
struct Cli {
    /// Video file to upload
    video: PathBuf,

    /// Question about the video
    question: String,

    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Inference endpoint, overrides the configuration
    #[arg(short, long)]
    endpoint: Option<String>,
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = config::load(cli.config.as_deref(), cli.endpoint)
        .context("failed to load configuration")?;
    let client = AskClient::new(&config)?;

    println!(
        "\n{}  {}\n",
        style("vidask").cyan().bold(),
        style("Video Q&A").dim()
    );

    let file = SelectedFile::open(&cli.video)
        .await
        .with_context(|| format!("cannot use {}", cli.video.display()))?;
    println!(
        "{} Video: {} {}",
        style("✓").green().bold(),
        file.name(),
        style(format!("({})", file.display_size())).dim()
    );

    let mut session = Session::new();
    session.select_file(file);
    session.set_question(cli.question);
    let submission = session.submit();

    let started = Instant::now();
    let spinner = create_spinner(&format!("Asking {}...", client.endpoint()));
    match client.ask(&submission).await {
        Ok(answer) => {
            spinner.finish_with_message(format!(
                "{} Answered {}",
                style("✓").green().bold(),
                style(format!("[{}]", format_duration(started.elapsed()))).dim()
            ));
            println!("{}", style("─".repeat(60)).dim());
            println!("{}", answer);
            session.complete(submission.generation, Ok(answer));
            Ok(())
        }
        Err(err) => {
            spinner.finish_with_message(format!("{} Failed", style("✗").red().bold()));
            let failure = Failure::from(err);
            eprintln!("{} {}", style("Error:").red().bold(), failure.message);
            session.complete(submission.generation, Err(failure));
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_are_compact() {
        assert_eq!(format_duration(Duration::from_millis(4_200)), "4.2s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    }

    #[test]
    fn default_log_filter_is_valid() {
        assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
        assert!(DEFAULT_LOG_FILTER.contains("vidask_core=warn"));
    }

    #[test]
    fn cli_requires_video_and_question() {
        let cli = Cli::try_parse_from([
            "vidask",
            "clip.mp4",
            "what happens?",
            "-e",
            "http://localhost/ask",
        ])
        .unwrap();
        assert_eq!(cli.video, PathBuf::from("clip.mp4"));
        assert_eq!(cli.question, "what happens?");
        assert_eq!(cli.endpoint.as_deref(), Some("http://localhost/ask"));

        assert!(Cli::try_parse_from(["vidask", "clip.mp4"]).is_err());
    }
}
