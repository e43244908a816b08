//! Date-range restriction of series.

use crate::domain::{DateInterval, Point, Series, SeriesMap};

/// Points of `series` whose date lies in `interval` (inclusive), order kept.
pub fn filter_series(series: &[Point], interval: &DateInterval) -> Series {
    series
        .iter()
        .filter(|p| interval.contains(p.time))
        .copied()
        .collect()
}

/// Apply [`filter_series`] to every series of the map.
///
/// Every name present in `map` stays present, possibly with an empty series.
/// No rectangularity is assumed: series may end up with different lengths.
pub fn filter_series_map(map: &SeriesMap, interval: &DateInterval) -> SeriesMap {
    map.iter()
        .map(|(name, series)| (name.to_string(), filter_series(series, interval)))
        .collect()
}
