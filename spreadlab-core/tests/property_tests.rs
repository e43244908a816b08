//! Property tests for analytics invariants.
//!
//! Uses proptest to verify:
//! 1. SMA length — `len(SMA(S, p)) == max(0, len(S) - p + 1)`
//! 2. SMA dates — a strictly increasing subsequence of the input dates
//! 3. Filter identity — filtering to the full span returns the series
//! 4. Single-member dispersion — always zero
//! 5. Stats ordering — `min <= mean <= max` for non-empty finite groups

use chrono::NaiveDate;
use proptest::prelude::*;
use spreadlab_core::{
    centered_sma, filter_series, group_stats, CenteredSma, DateInterval, Point, SeriesMap,
    SmaWindow,
};

fn series_from(values: &[f64]) -> Vec<Point> {
    let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| Point::new(base + chrono::Duration::days(i as i64 * 2), v))
        .collect()
}

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1000.0..1000.0_f64, 0..80)
}

fn arb_window() -> impl Strategy<Value = SmaWindow> {
    prop_oneof![Just(SmaWindow::ExcludeCurrent), Just(SmaWindow::IncludeCurrent)]
}

// ── 1–2. SMA shape ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn sma_length_law(values in arb_values(), period in 1usize..60, window in arb_window()) {
        let s = series_from(&values);
        let out = CenteredSma::new(period).with_window(window).compute(&s);
        let expected = (s.len() + 1).saturating_sub(period);
        prop_assert_eq!(out.len(), expected);
    }

    #[test]
    fn sma_dates_are_ordered_subsequence(values in arb_values(), period in 2usize..50) {
        let s = series_from(&values);
        let out = centered_sma(&s, period);

        for pair in out.windows(2) {
            prop_assert!(pair[0].time < pair[1].time);
        }

        let mut cursor = s.iter();
        for p in &out {
            prop_assert!(cursor.any(|q| q.time == p.time), "date {} not in input order", p.time);
        }
    }

    #[test]
    fn sma_of_constant_series_is_constant(
        c in -500.0..500.0_f64,
        len in 2usize..40,
        period in 2usize..40,
    ) {
        let s = series_from(&vec![c; len]);
        for p in centered_sma(&s, period) {
            prop_assert!((p.value - c).abs() < 1e-9);
        }
    }
}

// ── 3. Filter identity ───────────────────────────────────────────────

proptest! {
    #[test]
    fn full_span_filter_is_identity(values in prop::collection::vec(-1e6..1e6_f64, 1..60)) {
        let s = series_from(&values);
        let span = DateInterval::new(s[0].time, s[s.len() - 1].time);
        prop_assert_eq!(filter_series(&s, &span), s);
    }

    #[test]
    fn single_day_filter_keeps_at_most_that_day(values in arb_values(), offset in 0i64..200) {
        let s = series_from(&values);
        let day = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Duration::days(offset);
        let out = filter_series(&s, &DateInterval::day(day));
        prop_assert!(out.len() <= 1);
        prop_assert!(out.iter().all(|p| p.time == day));
    }
}

// ── 4–5. Group statistics ────────────────────────────────────────────

proptest! {
    #[test]
    fn single_member_dispersion_is_zero(values in prop::collection::vec(-1e4..1e4_f64, 1..60)) {
        let mut map = SeriesMap::new();
        map.insert("ONLY", series_from(&values));
        let stats = group_stats(&map, &["ONLY"]);
        prop_assert_eq!(stats.dispersion, 0.0);
    }

    #[test]
    fn stats_are_ordered(
        a in prop::collection::vec(-1e4..1e4_f64, 1..40),
        b in prop::collection::vec(-1e4..1e4_f64, 1..40),
    ) {
        let mut map = SeriesMap::new();
        map.insert("A", series_from(&a));
        map.insert("B", series_from(&b));
        let stats = group_stats(&map, &["A", "B"]);

        prop_assert_eq!(stats.count, a.len() + b.len());
        prop_assert!(stats.min <= stats.mean + 1e-9);
        prop_assert!(stats.mean <= stats.max + 1e-9);
        prop_assert!(stats.dispersion >= 0.0);
    }
}
