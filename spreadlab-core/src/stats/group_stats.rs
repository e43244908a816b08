//! Cross-sectional dispersion of a group.
//!
//! `dispersion` is the root-mean-square deviation of every observation from
//! the mean of all group members observed on the same date. It measures how
//! tightly the members track each other, not how much any one of them moves.
//!
//! The running maximum starts at `0.0`, not at the first observation, so a
//! group whose values are all negative reports `max = 0`. The empty-group
//! result follows from the same rule. Overview records use true extrema.

use super::{nan_max, Pool};
use crate::domain::{Point, SeriesMap};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Descriptive statistics pooled over all observations of a group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub dispersion: f64,
    /// Number of pooled observations.
    pub count: usize,
}

impl GroupStats {
    /// Result for a group without observations.
    ///
    /// `min` is `+inf`, so callers must check [`GroupStats::is_empty`]
    /// before presenting it.
    pub const EMPTY: GroupStats = GroupStats {
        min: f64::INFINITY,
        max: 0.0,
        mean: 0.0,
        dispersion: 0.0,
        count: 0,
    };

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether any statistic was poisoned by a NaN observation.
    pub fn is_degraded(&self) -> bool {
        self.min.is_nan() || self.max.is_nan() || self.mean.is_nan() || self.dispersion.is_nan()
    }
}

/// Compute [`GroupStats`] for the named members.
///
/// Members are a set: order does not matter and repeated names count once.
/// Unknown names contribute no observations. Member series need not share
/// dates; a date seen by only some members is averaged over those members.
pub fn group_stats<S: AsRef<str>>(series: &SeriesMap, members: &[S]) -> GroupStats {
    let mut seen = HashSet::new();
    let members: Vec<&[Point]> = members
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| seen.insert(*name))
        .map(|name| series.get(name))
        .collect();

    let mut per_date: HashMap<NaiveDate, (f64, usize)> = HashMap::new();
    for points in &members {
        for p in points.iter() {
            let slot = per_date.entry(p.time).or_insert((0.0, 0));
            slot.0 += p.value;
            slot.1 += 1;
        }
    }

    let mut pool = Pool::new();
    let mut max = 0.0;
    let mut squared_deviation = 0.0;
    for points in &members {
        for p in points.iter() {
            let (sum, count) = per_date[&p.time];
            let date_mean = sum / count as f64;
            squared_deviation += (p.value - date_mean).powi(2);
            pool.push(p.value);
            max = nan_max(max, p.value);
        }
    }

    if pool.count == 0 {
        return GroupStats::EMPTY;
    }

    let n = pool.count as f64;
    GroupStats {
        min: pool.min,
        max,
        mean: pool.sum / n,
        dispersion: (squared_deviation / n).sqrt(),
        count: pool.count,
    }
}
