use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, info};
use crate::capture::{CaptureError, FrameSource};
use crate::detection::DetectionPipeline;
use crate::report::Reporter;
use crate::stats::{SessionStats, StatsError, StatsSnapshot};

/// Timing knobs for the capture loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// Time between interval reports
    pub interval: Duration,
    /// Soft limit on total run time, checked once per iteration
    pub duration: Option<Duration>,
    /// Pause after every frame so the loop does not spin a core
    pub idle: Duration,
    /// Zero the totals after each interval report instead of keeping session totals
    pub reset_after_report: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            duration: None,
            idle: Duration::from_millis(10),
            reset_after_report: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Stats(#[from] StatsError),
}

/// Owns everything one capture session needs: source, detector, stats and reporter
pub struct Session<S, R> {
    source: S,
    pipeline: DetectionPipeline,
    reporter: R,
    config: SessionConfig,
    stats: SessionStats,
}

impl<S: FrameSource, R: Reporter> Session<S, R> {
    pub fn new(source: S, pipeline: DetectionPipeline, reporter: R, config: SessionConfig) -> Self {
        Self {
            source,
            pipeline,
            reporter,
            config,
            stats: SessionStats::new(),
        }
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Run until `shutdown` resolves, the configured duration passes, or the frame
    /// source fails. The final snapshot is always rendered before returning, except
    /// after a capture failure before any frame was recorded.
    pub async fn run<F>(&mut self, shutdown: F) -> Result<StatsSnapshot, SessionError>
    where
        F: Future<Output = ()>,
    {
        let started = Instant::now();
        let mut last_report = started;
        self.stats = SessionStats::starting_at(started.into_std());
        tokio::pin!(shutdown);

        info!(
            source = self.source.name(),
            interval_secs = self.config.interval.as_secs_f64(),
            duration_secs = self.config.duration.map(|d| d.as_secs_f64()),
            "Starting card detection session"
        );

        // Poll once before the first blocking fetch so signal handlers are installed
        let mut stopping = tokio::select! {
            biased;
            _ = &mut shutdown => true,
            _ = std::future::ready(()) => false,
        };

        while !stopping {
            if let Some(limit) = self.config.duration {
                if started.elapsed() >= limit {
                    info!("Configured duration reached");
                    break;
                }
            }

            // Blocking fetch; the only call in the loop that may wait on the outside world
            let frame = match self.source.next_frame() {
                Ok(frame) => frame,
                Err(e) => {
                    error!(error = %e, "Frame capture failed");
                    let last = self.stats.finalize_at(Instant::now().into_std());
                    if last.frames_processed > 0 {
                        self.reporter.render(&last);
                    }
                    return Err(e.into());
                }
            };

            let detection = self.pipeline.detect(&frame);
            self.stats.record_frame(&detection.counts, frame.captured_at)?;
            debug!(
                frame = self.stats.frames_processed(),
                cards = detection.counts.total(),
                "Processed frame"
            );

            let now = Instant::now();
            if now.duration_since(last_report) >= self.config.interval {
                let snapshot = self.stats.snapshot_at(now.into_std());
                self.reporter.render(&snapshot);
                last_report = now;
                if self.config.reset_after_report {
                    self.stats.reset()?;
                }
            }

            stopping = tokio::select! {
                biased;
                _ = &mut shutdown => true,
                _ = tokio::time::sleep(self.config.idle) => false,
            };
        }

        if stopping {
            info!("Stopping card detection session");
        }

        let snapshot = self.stats.finalize_at(Instant::now().into_std());
        self.reporter.render(&snapshot);
        info!(
            frames = snapshot.frames_processed,
            cards = snapshot.total_cards(),
            "Session ended"
        );
        Ok(snapshot)
    }
}
