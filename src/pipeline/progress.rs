use tracing::info;

use crate::pipeline::runner::RunSummary;

/// Receives progress updates from the per-position loop
pub trait ProgressReporter {
    /// Called after each position, with the 1-based count processed so far.
    fn processed(&mut self, done: usize, total: usize);

    /// Called once after the last position.
    fn finished(&mut self, _summary: &RunSummary) {}
}

/// Logs a line every `interval` positions and a final summary
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress {
    /// 0 disables periodic lines
    interval: usize,
}

impl LogProgress {
    pub fn new(interval: usize) -> Self {
        Self { interval }
    }
}

impl ProgressReporter for LogProgress {
    fn processed(&mut self, done: usize, total: usize) {
        if self.interval > 0 && done % self.interval == 0 {
            info!("Processed {done}/{total} positions");
        }
    }

    fn finished(&mut self, summary: &RunSummary) {
        info!(
            "Resolved {} positions: {} from ancestors, {} from within-species paralogs, {} missing, {} without reference sequence",
            summary.total,
            summary.ancestor,
            summary.within_species,
            summary.exhausted,
            summary.no_reference,
        );
    }
}

/// Discards all progress updates
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn processed(&mut self, _done: usize, _total: usize) {}
}
