//! Per-frame aggregation and the session-wide statistics accumulator.
//!
//! `SessionStats` is owned by whoever drives the capture loop. Readers only ever see
//! [`StatsSnapshot`] copies, never the live counters.

use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;
use crate::models::{CardCategory, CategoryCounts, FrameCounts};

/// Weight of the newest inter-frame interval in the moving average
pub const FPS_SMOOTHING: f64 = 0.2;

/// Count occurrences of each category among one frame's labels
pub fn aggregate<I>(labels: I) -> FrameCounts
where
    I: IntoIterator<Item = CardCategory>,
{
    let mut counts = FrameCounts::new();
    for label in labels {
        counts.increment(label);
    }
    counts
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Finalized,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Active => f.write_str("active"),
            SessionState::Finalized => f.write_str("finalized"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    #[error("cannot {operation} a {state} session")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },
}

/// Immutable point-in-time copy of the session statistics
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSnapshot {
    pub counts: CategoryCounts,
    pub frames_processed: u64,
    pub elapsed: Duration,
    pub fps: f64,
    pub is_final: bool,
}

impl StatsSnapshot {
    pub fn total_cards(&self) -> u64 {
        self.counts.total()
    }

    /// Percentage of all detected cards that fell into `category`
    pub fn share(&self, category: CardCategory) -> f64 {
        let total = self.total_cards();
        if total == 0 {
            return 0.0;
        }
        self.counts[category] as f64 / total as f64 * 100.0
    }
}

/// Cumulative counters for one capture session
#[derive(Debug, Clone)]
pub struct SessionStats {
    counts: CategoryCounts,
    frames_processed: u64,
    session_start: Instant,
    last_frame: Option<Instant>,
    /// Smoothed inter-frame interval in seconds
    mean_interval: Option<f64>,
    state: SessionState,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(session_start: Instant) -> Self {
        Self {
            counts: CategoryCounts::new(),
            frames_processed: 0,
            session_start,
            last_frame: None,
            mean_interval: None,
            state: SessionState::Active,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn session_start(&self) -> Instant {
        self.session_start
    }

    pub fn last_frame(&self) -> Option<Instant> {
        self.last_frame
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    pub fn counts(&self) -> &CategoryCounts {
        &self.counts
    }

    /// Frames per second from the smoothed inter-frame interval (0 until two frames)
    pub fn fps(&self) -> f64 {
        match self.mean_interval {
            Some(interval) if interval > 0.0 => 1.0 / interval,
            _ => 0.0,
        }
    }

    fn ensure_active(&self, operation: &'static str) -> Result<(), StatsError> {
        match self.state {
            SessionState::Active => Ok(()),
            state => Err(StatsError::InvalidState { operation, state }),
        }
    }

    /// Merge one frame's counts into the running totals
    pub fn record_frame(&mut self, frame: &FrameCounts, timestamp: Instant) -> Result<(), StatsError> {
        self.ensure_active("record a frame in")?;

        self.counts.merge(frame);
        self.frames_processed += 1;

        if let Some(previous) = self.last_frame {
            let interval = timestamp.saturating_duration_since(previous).as_secs_f64();
            self.mean_interval = Some(match self.mean_interval {
                Some(mean) => mean + FPS_SMOOTHING * (interval - mean),
                None => interval,
            });
        }
        self.last_frame = Some(timestamp);

        Ok(())
    }

    /// Snapshot at the current instant
    pub fn snapshot(&self) -> StatsSnapshot {
        self.snapshot_at(Instant::now())
    }

    pub fn snapshot_at(&self, now: Instant) -> StatsSnapshot {
        StatsSnapshot {
            counts: self.counts,
            frames_processed: self.frames_processed,
            elapsed: now.saturating_duration_since(self.session_start),
            fps: self.fps(),
            is_final: self.state == SessionState::Finalized,
        }
    }

    /// Zero the totals and frame counter. The session start, last frame time and FPS
    /// estimate are kept, so only the counts become interval-scoped.
    pub fn reset(&mut self) -> Result<(), StatsError> {
        self.ensure_active("reset")?;
        debug!(frames = self.frames_processed, "Resetting cumulative stats");
        self.counts = CategoryCounts::new();
        self.frames_processed = 0;
        Ok(())
    }

    /// Stop accepting frames and return the final snapshot. Calling it again just
    /// returns a fresh final snapshot.
    pub fn finalize(&mut self) -> StatsSnapshot {
        self.finalize_at(Instant::now())
    }

    pub fn finalize_at(&mut self, now: Instant) -> StatsSnapshot {
        self.state = SessionState::Finalized;
        self.snapshot_at(now)
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}
