use cardwatch::{CardCategory, DetectionPipeline, ReplaySource, Session, SessionConfig, TextReporter};
use std::env;
use std::time::Duration;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <image_dir>", args[0]);
        std::process::exit(1);
    }

    let source = ReplaySource::from_dir(&args[1])?;
    println!("Replaying {} images from {}", source.len(), args[1]);

    // Faster reports and a short run
    let config = SessionConfig {
        interval: Duration::from_millis(500),
        duration: Some(Duration::from_secs(3)),
        ..SessionConfig::default()
    };

    let mut session = Session::new(source, DetectionPipeline::new(), TextReporter::stdout(), config);
    let snapshot = session.run(std::future::pending()).await?;

    println!("\nFinal results:");
    println!("Total frames: {}", snapshot.frames_processed);
    println!("Total cards: {}", snapshot.total_cards());
    for category in CardCategory::ALL {
        println!("  {}: {}", category, snapshot.counts[category]);
    }

    Ok(())
}
