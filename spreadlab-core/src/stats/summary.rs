//! One synthetic candle per group for the comparative overview chart.
//!
//! The record is shaped like OHLC but is not price data: `low`/`high` are
//! the true pooled extrema while `open`/`close` bracket the pooled mean at
//! ±1%. Because of that bracket, `low <= open` and `close <= high` do not
//! hold for near-constant groups.

use super::Pool;
use crate::domain::{Group, Point, SeriesMap};
use crate::palette::{ColorSource, Palette, Rgb};
use serde::Serialize;
use std::collections::HashSet;

pub const OPEN_FACTOR: f64 = 0.99;
pub const CLOSE_FACTOR: f64 = 1.01;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummaryRecord {
    /// Ordinal of the group in the input list.
    pub group_key: usize,
    pub name: String,
    pub low: f64,
    pub high: f64,
    pub open: f64,
    pub close: f64,
    /// Chart slot among emitted records, starting at 1.
    pub label_day: usize,
    /// Pseudo-date `2000-01-DD` naming the chart slot.
    pub label: String,
    /// Ordinal among all input groups, skipped ones included.
    pub color_index: usize,
    pub color: Rgb,
}

/// Build overview records for `groups` from (usually date-filtered) `series`.
///
/// A group is skipped, without consuming a label slot, when it has no
/// members or when any member has no points. Colour indices always follow
/// the input ordinal.
pub fn synthesize_summaries(
    groups: &[Group],
    series: &SeriesMap,
    palette: &Palette,
    fallback: &mut dyn ColorSource,
) -> Vec<GroupSummaryRecord> {
    let mut records = Vec::with_capacity(groups.len());

    for (ordinal, group) in groups.iter().enumerate() {
        let Some(pool) = pool_group(group, series) else {
            tracing::debug!(group = ordinal, "skipping group without observations");
            continue;
        };

        let mean = pool.mean();
        let label_day = records.len() + 1;
        records.push(GroupSummaryRecord {
            group_key: ordinal,
            name: group.display_name(ordinal),
            low: pool.min,
            high: pool.max,
            open: mean * OPEN_FACTOR,
            close: mean * CLOSE_FACTOR,
            label_day,
            label: format!("2000-01-{label_day:02}"),
            color_index: ordinal,
            color: palette.resolve(ordinal, fallback),
        });
    }

    records
}

fn pool_group(group: &Group, series: &SeriesMap) -> Option<Pool> {
    let mut seen = HashSet::new();
    let members: Vec<&[Point]> = group
        .members
        .iter()
        .filter(|m| seen.insert(m.name.as_str()))
        .map(|m| series.get(&m.name))
        .collect();

    if members.is_empty() || members.iter().any(|points| points.is_empty()) {
        return None;
    }

    let mut pool = Pool::new();
    for points in members {
        for p in points {
            pool.push(p.value);
        }
    }
    Some(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Instrument;
    use crate::indicators::{assert_approx, make_series, DEFAULT_EPSILON};
    use crate::palette::{SeededColors, DEFAULT_PALETTE};

    fn map() -> SeriesMap {
        let mut m = SeriesMap::new();
        m.insert("AAA", make_series(&[10.0, 12.0, 14.0]));
        m.insert("BBB", make_series(&[20.0, 18.0, 16.0]));
        m.insert("CCC", make_series(&[5.0, 5.0, 5.0]));
        m.insert("EMPTY", Vec::new());
        m
    }

    fn group(names: &[&str]) -> Group {
        Group::new(
            names
                .iter()
                .enumerate()
                .map(|(i, n)| Instrument::new(i, *n))
                .collect(),
        )
    }

    fn run(groups: &[Group]) -> Vec<GroupSummaryRecord> {
        synthesize_summaries(groups, &map(), &Palette::default(), &mut SeededColors::new(1))
    }

    #[test]
    fn record_follows_formula() {
        let records = run(&[group(&["AAA", "BBB"])]);
        assert_eq!(records.len(), 1);

        let r = &records[0];
        assert_eq!(r.low, 10.0);
        assert_eq!(r.high, 20.0);
        assert_approx(r.open, 15.0 * 0.99, DEFAULT_EPSILON);
        assert_approx(r.close, 15.0 * 1.01, DEFAULT_EPSILON);
        assert_eq!(r.label, "2000-01-01");
        assert_eq!(r.label_day, 1);
        assert_eq!(r.color_index, 0);
        assert_eq!(r.color, DEFAULT_PALETTE[0]);
        assert_eq!(r.name, "Group 1");
    }

    #[test]
    fn constant_group_open_below_low() {
        let records = run(&[group(&["CCC"])]);
        let r = &records[0];
        assert_eq!(r.low, 5.0);
        assert_eq!(r.high, 5.0);
        assert_eq!(r.open, 5.0 * OPEN_FACTOR);
        assert_eq!(r.close, 5.0 * CLOSE_FACTOR);
        assert!(r.open < r.low);
        assert!(r.close > r.high);
    }

    #[test]
    fn skipped_groups_keep_color_but_not_label() {
        let groups = [
            group(&[]),
            group(&["AAA"]),
            group(&["AAA", "EMPTY"]),
            group(&["BBB"]),
        ];
        let records = run(&groups);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].group_key, 1);
        assert_eq!(records[0].label, "2000-01-01");
        assert_eq!(records[0].color_index, 1);
        assert_eq!(records[0].color, DEFAULT_PALETTE[1]);

        assert_eq!(records[1].group_key, 3);
        assert_eq!(records[1].label, "2000-01-02");
        assert_eq!(records[1].color_index, 3);
        assert_eq!(records[1].color, DEFAULT_PALETTE[3]);
    }

    #[test]
    fn unknown_member_skips_group() {
        assert!(run(&[group(&["AAA", "ZZZ"])]).is_empty());
    }

    #[test]
    fn groups_past_palette_use_fallback() {
        let groups: Vec<Group> = (0..50).map(|_| group(&["AAA"])).collect();
        let records = run(&groups);

        assert_eq!(records.len(), 50);
        assert_eq!(records[46].color, DEFAULT_PALETTE[46]);
        assert_eq!(records[48].color, SeededColors::new(1).color_for(48));
        assert_eq!(records[49].label, "2000-01-50");
    }

    #[test]
    fn named_group_keeps_its_name() {
        let mut g = group(&["AAA"]);
        g.name = Some("Banks".into());
        assert_eq!(run(&[g])[0].name, "Banks");
    }

    #[test]
    fn nan_observation_propagates() {
        let mut m = map();
        m.insert("NAN", make_series(&[1.0, f64::NAN, 3.0]));
        let records = synthesize_summaries(
            &[group(&["NAN"])],
            &m,
            &Palette::default(),
            &mut SeededColors::new(1),
        );
        let r = &records[0];
        assert!(r.low.is_nan());
        assert!(r.high.is_nan());
        assert!(r.open.is_nan());
        assert!(r.close.is_nan());
    }
}
