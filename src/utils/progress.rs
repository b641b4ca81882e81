use std::time::Instant;
use tracing::info;

pub const DEFAULT_LOG_EVERY_PERCENT: u8 = 10;

/// Row-count driven progress reporting through `tracing`.
#[derive(Debug)]
pub struct ProgressTracker {
    label: String,
    total: usize,
    processed: usize,
    log_every_percent: u8,
    next_report: f32,
    started: Instant,
}

impl ProgressTracker {
    pub fn new(label: impl Into<String>, total: usize) -> Self {
        Self::with_interval(label, total, DEFAULT_LOG_EVERY_PERCENT)
    }

    pub fn with_interval(label: impl Into<String>, total: usize, log_every_percent: u8) -> Self {
        let step = log_every_percent.clamp(1, 100);
        Self {
            label: label.into(),
            total,
            processed: 0,
            log_every_percent: step,
            next_report: step as f32 / 100.0,
            started: Instant::now(),
        }
    }

    pub fn advance(&mut self, rows: usize) {
        self.processed += rows;
        let progress = self.progress();
        if progress < self.next_report || self.processed >= self.total {
            return;
        }

        info!(
            task = %self.label,
            rows = self.processed,
            total = self.total,
            "{:.0}% done",
            progress * 100.0
        );
        let step = self.log_every_percent as f32 / 100.0;
        while self.next_report <= progress {
            self.next_report += step;
        }
    }

    pub fn progress(&self) -> f32 {
        if self.total > 0 {
            (self.processed as f32 / self.total as f32).min(1.0)
        } else {
            0.0
        }
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn finish(self) -> usize {
        info!(
            task = %self.label,
            rows = self.processed,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "Finished"
        );
        self.processed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_fraction_of_total() {
        let mut tracker = ProgressTracker::new("copy", 200);
        tracker.advance(50);
        assert_eq!(tracker.processed(), 50);
        assert!((tracker.progress() - 0.25).abs() < f32::EPSILON);
        tracker.advance(150);
        assert!((tracker.progress() - 1.0).abs() < f32::EPSILON);
        assert_eq!(tracker.finish(), 200);
    }

    #[test]
    fn zero_total_reports_no_progress() {
        let mut tracker = ProgressTracker::new("empty", 0);
        tracker.advance(3);
        assert_eq!(tracker.progress(), 0.0);
    }

    #[test]
    fn skipping_ahead_counts_as_progress() {
        let mut tracker = ProgressTracker::with_interval("trim", 10, 50);
        tracker.advance(7);
        assert!(tracker.next_report > 0.7);
    }
}
