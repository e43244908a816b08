//! Integration tests: decoded rows in, analytics out.

use chrono::NaiveDate;
use spreadlab_core::{
    centered_sma, filter_series_map, group_stats, ingest_rows, synthesize_summaries, DateInterval,
    Group, IngestError, Palette, SeededColors,
};

fn sample_rows() -> Vec<Vec<String>> {
    let raw = [
        "date,SBER,GAZP,LKOH",
        "2024-01-09,271.1,163.2,6950.5",
        "2024-01-10,272.4,162.9,6990",
        "2024-01-11,274.0,,7011.5",
        "2024-01-12,273.3,164.1,7030",
        "2024-01-15,275.8,165.0,7002.5",
    ];
    raw.iter()
        .map(|line| line.split(',').map(str::to_string).collect())
        .collect()
}

fn d(m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, day).unwrap()
}

#[test]
fn lookup_reproduces_source_values() {
    let rows = sample_rows();
    let ds = ingest_rows(&rows).unwrap();

    for row in rows.iter().skip(1) {
        let date = NaiveDate::parse_from_str(&row[0], "%Y-%m-%d").unwrap();
        for (instrument, cell) in ds.instruments.iter().zip(&row[1..]) {
            let value = ds.series.value_at(&instrument.name, date).unwrap();
            match cell.parse::<f64>() {
                Ok(expected) => assert_eq!(value, expected),
                Err(_) => assert!(value.is_nan()),
            }
        }
    }
}

#[test]
fn series_are_rectangular() {
    let ds = ingest_rows(&sample_rows()).unwrap();
    let dates = ds.dates();
    assert_eq!(dates.len(), 5);
    for instrument in &ds.instruments {
        let times: Vec<NaiveDate> =
            ds.series.get(&instrument.name).iter().map(|p| p.time).collect();
        assert_eq!(times, dates);
    }
    assert_eq!(ds.span, Some(DateInterval::new(d(1, 9), d(1, 15))));
    assert_eq!(ds.nan_cells, 1);
}

#[test]
fn nan_cell_degrades_only_its_consumers() {
    let ds = ingest_rows(&sample_rows()).unwrap();

    let sber = group_stats(&ds.series, &["SBER", "LKOH"]);
    assert!(!sber.is_degraded());

    let gazp = group_stats(&ds.series, &["SBER", "GAZP"]);
    assert!(gazp.is_degraded());

    // GAZP's NaN sits at index 2; windows before it stay finite
    let sma = centered_sma(ds.series.get("GAZP"), 2);
    assert!(sma[0].value.is_finite());
    assert!(sma[1].value.is_finite());
    assert!(sma[2].value.is_nan());
    assert!(sma[3].value.is_finite());
}

#[test]
fn overview_after_date_filter() {
    let ds = ingest_rows(&sample_rows()).unwrap();
    let filtered = filter_series_map(&ds.series, &DateInterval::new(d(1, 12), d(1, 31)));

    let groups = vec![
        Group::named("oil", ds.instruments[1..].to_vec()),
        Group::named("bank", vec![ds.instruments[0].clone()]),
    ];
    let records =
        synthesize_summaries(&groups, &filtered, &Palette::default(), &mut SeededColors::new(3));

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].low, 164.1);
    assert_eq!(records[0].high, 7030.0);
    assert_eq!(records[1].low, 273.3);
    assert_eq!(records[1].high, 275.8);
    assert_eq!(records[1].label, "2000-01-02");
}

#[test]
fn interval_outside_data_skips_every_group() {
    let ds = ingest_rows(&sample_rows()).unwrap();
    let filtered = filter_series_map(&ds.series, &DateInterval::day(d(2, 1)));
    let groups = vec![Group::new(ds.instruments.clone())];
    let records =
        synthesize_summaries(&groups, &filtered, &Palette::default(), &mut SeededColors::new(3));
    assert!(records.is_empty());
}

#[test]
fn ragged_table_is_rejected_whole() {
    let mut rows = sample_rows();
    rows[3].pop();
    assert!(matches!(
        ingest_rows(&rows),
        Err(IngestError::RaggedRow { row: 3, expected: 4, found: 3 })
    ));
}
