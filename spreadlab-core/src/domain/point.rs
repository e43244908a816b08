//! Point, Series and SeriesMap: the shapes every analytics stage consumes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One dated observation of an instrument.
///
/// `value` may be NaN when the source cell could not be parsed; reducers
/// propagate it rather than coercing it to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub time: NaiveDate,
    pub value: f64,
}

impl Point {
    pub fn new(time: NaiveDate, value: f64) -> Self {
        Self { time, value }
    }
}

/// Ordered points of one instrument, ascending by `time` with no duplicates.
pub type Series = Vec<Point>;

/// Instrument name → series.
///
/// Built once per ingested table and read-only afterwards. Looking up an
/// unknown name yields an empty slice instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesMap {
    inner: BTreeMap<String, Series>,
}

impl SeriesMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, series: Series) {
        self.inner.insert(name.into(), series);
    }

    /// Series for `name`, or an empty slice when the name is unknown.
    pub fn get(&self, name: &str) -> &[Point] {
        self.inner.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Point])> {
        self.inner
            .iter()
            .map(|(name, series)| (name.as_str(), series.as_slice()))
    }

    /// Value of `name` on `date`, if that instrument has a point there.
    pub fn value_at(&self, name: &str, date: NaiveDate) -> Option<f64> {
        let series = self.get(name);
        series
            .binary_search_by_key(&date, |p| p.time)
            .ok()
            .map(|i| series[i].value)
    }
}

impl FromIterator<(String, Series)> for SeriesMap {
    fn from_iter<I: IntoIterator<Item = (String, Series)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}
