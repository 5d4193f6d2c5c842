use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cardwatch::capture::{self, FrameSource, ReplaySource};
use cardwatch::{DetectionPipeline, Session, SessionConfig, TextReporter};

#[derive(Parser)]
#[command(name = "cardwatch")]
#[command(about = "Watch the screen for playing cards and keep running statistics")]
struct Cli {
    /// Seconds between statistics updates
    #[arg(long, value_name = "SECS", default_value = "1.0", value_parser = positive_secs)]
    interval: Duration,

    /// Monitor number to capture (1 = primary)
    #[arg(long, value_name = "N", default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    monitor: u16,

    /// How long to run in seconds (default: until interrupted)
    #[arg(long, value_name = "SECS", value_parser = positive_secs)]
    duration: Option<Duration>,

    /// Replay still images from a directory instead of capturing the screen
    #[arg(long, value_name = "DIR")]
    replay: Option<PathBuf>,

    /// Zero the totals after every report instead of keeping session totals
    #[arg(long)]
    reset_each_interval: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn positive_secs(raw: &str) -> Result<Duration, String> {
    let secs: f64 = raw.parse().map_err(|e: std::num::ParseFloatError| e.to_string())?;
    if !(secs > 0.0) {
        return Err(format!("expected a positive number of seconds, got {}", raw));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| format!("{}: {}", raw, e))
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "cardwatch=debug" } else { "cardwatch=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let source: Box<dyn FrameSource> = match &args.replay {
        Some(dir) => Box::new(
            ReplaySource::from_dir(dir)
                .with_context(|| format!("Failed to open replay directory {}", dir.display()))?,
        ),
        None => capture::open_screen(args.monitor as usize)
            .with_context(|| format!("Failed to open monitor {}", args.monitor))?,
    };

    println!("Starting Real-Time Card Detection System...");
    println!("Monitoring: {}", source.name());
    println!("Update Interval: {} seconds", args.interval.as_secs_f64());
    println!("Press Ctrl+C to stop\n");

    let config = SessionConfig {
        interval: args.interval,
        duration: args.duration,
        reset_after_report: args.reset_each_interval,
        ..SessionConfig::default()
    };

    let mut session = Session::new(source, DetectionPipeline::new(), TextReporter::stdout(), config);
    session.run(shutdown_signal()).await?;

    println!("\nSession ended.");
    Ok(())
}
