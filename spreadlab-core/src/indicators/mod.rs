//! Series indicators.
//!
//! Indicators take a series and return a new series whose dates are a
//! subsequence of the input dates. Nothing is interpolated.

pub mod sma;

pub use sma::{centered_sma, CenteredSma, SmaWindow};

/// Build a daily series from values for testing, starting 2024-01-02.
#[cfg(test)]
pub fn make_series(values: &[f64]) -> crate::domain::Series {
    use crate::domain::Point;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| Point::new(base_date + chrono::Duration::days(i as i64), value))
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for numeric tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
