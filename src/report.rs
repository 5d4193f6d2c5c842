use std::io::{self, Write};
use time::OffsetDateTime;
use time::macros::format_description;
use tracing::warn;
use crate::models::CardCategory;
use crate::stats::StatsSnapshot;

const RULE_WIDTH: usize = 60;

/// Consumer of statistics snapshots
pub trait Reporter {
    fn render(&mut self, snapshot: &StatsSnapshot);
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn render(&mut self, snapshot: &StatsSnapshot) {
        (**self).render(snapshot)
    }
}

/// Collects every snapshot it is given
#[derive(Debug, Clone, Default)]
pub struct CollectingReporter {
    pub snapshots: Vec<StatsSnapshot>,
}

impl Reporter for CollectingReporter {
    fn render(&mut self, snapshot: &StatsSnapshot) {
        self.snapshots.push(snapshot.clone());
    }
}

/// Plain-text statistics block, one per snapshot
pub struct TextReporter<W: Write> {
    out: W,
}

impl TextReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_snapshot(&mut self, snapshot: &StatsSnapshot) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        let thin_rule = "-".repeat(RULE_WIDTH);

        writeln!(self.out)?;
        writeln!(self.out, "{}", rule)?;
        if snapshot.is_final {
            writeln!(self.out, "Final Statistics - {}", clock_time())?;
        } else {
            writeln!(self.out, "Card Detection Statistics - {}", clock_time())?;
        }
        writeln!(self.out, "{}", rule)?;
        writeln!(self.out, "Session Duration: {:.1} seconds", snapshot.elapsed.as_secs_f64())?;
        writeln!(self.out, "Frames Processed: {}", snapshot.frames_processed)?;
        writeln!(self.out, "Current FPS: {:.1}", snapshot.fps)?;
        writeln!(self.out, "Total Cards Detected: {}", snapshot.total_cards())?;
        writeln!(self.out)?;
        writeln!(self.out, "Card Type Breakdown:")?;
        writeln!(self.out, "{}", thin_rule)?;

        if snapshot.total_cards() == 0 {
            writeln!(self.out, "  No cards detected yet...")?;
        } else {
            for category in CardCategory::ALL {
                writeln!(
                    self.out,
                    "  {:20}: {:5} ({:5.1}%)",
                    category.as_str(),
                    snapshot.counts[category],
                    snapshot.share(category)
                )?;
            }
        }

        writeln!(self.out, "{}", rule)?;
        self.out.flush()
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn render(&mut self, snapshot: &StatsSnapshot) {
        if let Err(e) = self.write_snapshot(snapshot) {
            warn!(error = %e, "Failed to write statistics report");
        }
    }
}

/// Local wall-clock time as HH:MM:SS, falling back to UTC when the offset is unknown
fn clock_time() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_else(|_| String::from("--:--:--"))
}
