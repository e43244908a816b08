//! Pooled group statistics and overview synthesis.
//!
//! Both aggregators pool every `(member, date, value)` observation of a
//! group. NaN is contagious throughout: any NaN observation makes the
//! affected sums, extrema and deviations NaN.

pub mod group_stats;
pub mod summary;

pub use group_stats::{group_stats, GroupStats};
pub use summary::{synthesize_summaries, GroupSummaryRecord, CLOSE_FACTOR, OPEN_FACTOR};

/// Running sum, count and extrema over a stream of observations.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Pool {
    pub sum: f64,
    pub count: usize,
    pub min: f64,
    pub max: f64,
}

impl Pool {
    pub fn new() -> Self {
        Self {
            sum: 0.0,
            count: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    pub fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
        self.min = nan_min(self.min, value);
        self.max = nan_max(self.max, value);
    }

    pub fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// `min` that returns NaN when either side is NaN.
pub(crate) fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

/// `max` that returns NaN when either side is NaN.
pub(crate) fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}
