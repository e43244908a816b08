//! Centered Simple Moving Average.
//!
//! For each index `i` in `period-1 .. len`, the mean of a trailing window is
//! emitted at the date of index `i - ceil((period-1)/2)`, which re-centres
//! the average on the middle of its window. Output length is
//! `len - period + 1` (or zero).
//!
//! The default window is `[i-period+1, i)`: `period-1` points, excluding
//! index `i`. This is the established behaviour of the overview charts and
//! is kept for compatibility. `SmaWindow::IncludeCurrent` selects the full
//! `[i-period+1, i]` window instead.

use crate::domain::{Point, Series};
use serde::{Deserialize, Serialize};

/// Which points make up the window ending at index `i`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmaWindow {
    /// `period - 1` points `[i-period+1, i)`.
    #[default]
    ExcludeCurrent,
    /// `period` points `[i-period+1, i]`.
    IncludeCurrent,
}

#[derive(Debug, Clone)]
pub struct CenteredSma {
    period: usize,
    window: SmaWindow,
}

impl CenteredSma {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            window: SmaWindow::default(),
        }
    }

    pub fn with_window(mut self, window: SmaWindow) -> Self {
        self.window = window;
        self
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn window(&self) -> SmaWindow {
        self.window
    }

    /// Number of points produced for an input of `len` points.
    pub fn output_len(&self, len: usize) -> usize {
        if self.period == 0 {
            return 0;
        }
        (len + 1).saturating_sub(self.period)
    }

    /// Offset from the window's last index back to the labelled index.
    fn label_shift(&self) -> usize {
        (self.period - 1).div_ceil(2)
    }

    pub fn compute(&self, series: &[Point]) -> Series {
        let n = series.len();
        if self.period == 0 || n < self.period {
            return Vec::new();
        }

        let shift = self.label_shift();
        let mut result = Vec::with_capacity(self.output_len(n));

        for i in (self.period - 1)..n {
            let start = i + 1 - self.period;
            let window = match self.window {
                SmaWindow::ExcludeCurrent => &series[start..i],
                SmaWindow::IncludeCurrent => &series[start..=i],
            };
            result.push(Point::new(series[i - shift].time, mean(window)));
        }

        result
    }
}

/// Left-to-right mean; an empty window yields NaN and NaN inputs propagate.
///
/// Each window is summed from scratch so every value matches a plain
/// sequential sum exactly.
fn mean(window: &[Point]) -> f64 {
    let mut sum = 0.0;
    for p in window {
        sum += p.value;
    }
    sum / window.len() as f64
}

/// Centered SMA with the default window.
pub fn centered_sma(series: &[Point], period: usize) -> Series {
    CenteredSma::new(period).compute(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_series, DEFAULT_EPSILON};

    #[test]
    fn period_3_excludes_current_point() {
        let s = make_series(&[10.0, 20.0, 30.0, 40.0]);
        let result = centered_sma(&s, 3);

        assert_eq!(
            result,
            vec![Point::new(s[1].time, 15.0), Point::new(s[2].time, 25.0)]
        );
    }

    #[test]
    fn even_period_label_shift() {
        // period 4: window of 3 points, label shift ceil(3/2) = 2
        let s = make_series(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let result = centered_sma(&s, 4);

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].time, s[1].time);
        assert_approx(result[0].value, 2.0, DEFAULT_EPSILON);
        assert_eq!(result[2].time, s[3].time);
        assert_approx(result[2].value, 4.0, DEFAULT_EPSILON);
    }

    #[test]
    fn period_2_uses_previous_point() {
        let s = make_series(&[5.0, 7.0, 11.0]);
        let result = centered_sma(&s, 2);
        // label shift ceil(1/2) = 1, window is the single point before i
        assert_eq!(
            result,
            vec![Point::new(s[0].time, 5.0), Point::new(s[1].time, 7.0)]
        );
    }

    #[test]
    fn include_current_window() {
        let s = make_series(&[10.0, 20.0, 30.0, 40.0]);
        let result = CenteredSma::new(3)
            .with_window(SmaWindow::IncludeCurrent)
            .compute(&s);

        assert_eq!(
            result,
            vec![Point::new(s[1].time, 20.0), Point::new(s[2].time, 30.0)]
        );
    }

    #[test]
    fn too_short_series_is_empty() {
        let s = make_series(&[1.0, 2.0]);
        assert!(centered_sma(&s, 3).is_empty());
        assert!(centered_sma(&[], 2).is_empty());
    }

    #[test]
    fn period_equal_to_len_gives_one_point() {
        let s = make_series(&[2.0, 4.0, 6.0, 8.0, 10.0]);
        let result = centered_sma(&s, 5);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].time, s[2].time);
        assert_approx(result[0].value, 5.0, DEFAULT_EPSILON);
    }

    #[test]
    fn period_1_yields_nan_points() {
        let s = make_series(&[1.0, 2.0, 3.0]);
        let result = centered_sma(&s, 1);
        assert_eq!(result.len(), 3);
        for (out, input) in result.iter().zip(&s) {
            assert_eq!(out.time, input.time);
            assert!(out.value.is_nan());
        }
    }

    #[test]
    fn period_0_is_empty() {
        let s = make_series(&[1.0, 2.0, 3.0]);
        assert!(centered_sma(&s, 0).is_empty());
        assert_eq!(CenteredSma::new(0).output_len(3), 0);
    }

    #[test]
    fn nan_propagates_through_windows() {
        let mut s = make_series(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
        s[2].value = f64::NAN;
        let result = centered_sma(&s, 3);
        // windows: [0,1] [1,2] [2,3] [3,4]
        assert_approx(result[0].value, 10.5, DEFAULT_EPSILON);
        assert!(result[1].value.is_nan());
        assert!(result[2].value.is_nan());
        assert_approx(result[3].value, 13.5, DEFAULT_EPSILON);
    }

    #[test]
    fn output_len_matches_compute() {
        let s = make_series(&[1.0; 12]);
        for period in 1..=14 {
            let sma = CenteredSma::new(period);
            assert_eq!(sma.compute(&s).len(), sma.output_len(s.len()), "period {period}");
        }
    }
}
