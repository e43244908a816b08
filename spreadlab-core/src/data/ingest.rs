//! Wide-table ingestion.
//!
//! Input is an already-decoded table of string cells: row 0 is the header
//! (`[<date label>, name_1, .., name_n]`), every following row is
//! `[date, value_1, .., value_n]`. Output is one ascending series per
//! instrument, all sharing the same dates.
//!
//! Shape problems reject the whole table. A value cell that does not parse
//! becomes a NaN point and ingestion carries on.

use super::canonicalize::{parse_date, parse_float};
use crate::domain::{DateInterval, Instrument, Point, Series, SeriesMap};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

/// Structural failures that reject an entire table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error("table is empty: expected a header row")]
    MissingHeader,

    #[error("duplicate instrument name '{name}' in header")]
    DuplicateInstrument { name: String },

    #[error("row {row} has {found} cells, header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row}: cannot parse date '{value}'")]
    InvalidDate { row: usize, value: String },

    #[error("date {date} appears more than once")]
    DuplicateDate { date: NaiveDate },
}

/// Result of ingesting one table.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub series: SeriesMap,
    /// Value columns in header order.
    pub instruments: Vec<Instrument>,
    /// Body dates, ascending. Present even when there are no value columns.
    pub dates: Vec<NaiveDate>,
    /// Earliest and latest date; `None` for a header-only table.
    pub span: Option<DateInterval>,
    /// Number of value cells that degraded to NaN.
    pub nan_cells: usize,
}

impl Dataset {
    pub fn instrument(&self, name: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.name == name)
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of rows (dates) in the table body.
    pub fn row_count(&self) -> usize {
        self.dates.len()
    }
}

/// Ingest a decoded table into a [`Dataset`].
///
/// Body rows are sorted ascending by date. Rows made entirely of blank cells
/// are skipped. Trailing blank cells beyond the header width are tolerated.
pub fn ingest_rows<R, C>(rows: &[R]) -> Result<Dataset, IngestError>
where
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    let header: &[C] = rows.first().ok_or(IngestError::MissingHeader)?.as_ref();
    let width = header.len();

    let mut seen = HashSet::new();
    let mut instruments = Vec::with_capacity(width.saturating_sub(1));
    for (id, cell) in header.iter().skip(1).enumerate() {
        let name = cell.as_ref().trim().to_string();
        if !seen.insert(name.clone()) {
            return Err(IngestError::DuplicateInstrument { name });
        }
        instruments.push(Instrument::new(id, name));
    }

    let mut body: Vec<(NaiveDate, Vec<f64>)> = Vec::with_capacity(rows.len().saturating_sub(1));
    let mut nan_cells = 0;

    for (row_idx, row) in rows.iter().enumerate().skip(1) {
        let cells: &[C] = row.as_ref();
        if cells.iter().all(|c| c.as_ref().trim().is_empty()) {
            continue;
        }

        let overflow_is_blank = cells
            .iter()
            .skip(width)
            .all(|c| c.as_ref().trim().is_empty());
        if cells.len() < width || !overflow_is_blank {
            return Err(IngestError::RaggedRow {
                row: row_idx,
                expected: width,
                found: cells.len(),
            });
        }

        let raw_date = cells[0].as_ref();
        let date = parse_date(raw_date).ok_or_else(|| IngestError::InvalidDate {
            row: row_idx,
            value: raw_date.to_string(),
        })?;

        let values: Vec<f64> = cells[1..width]
            .iter()
            .map(|c| parse_float(c.as_ref()))
            .collect();
        nan_cells += values.iter().filter(|v| v.is_nan()).count();

        body.push((date, values));
    }

    body.sort_by_key(|(date, _)| *date);
    if let Some(pair) = body.windows(2).find(|w| w[0].0 == w[1].0) {
        return Err(IngestError::DuplicateDate { date: pair[0].0 });
    }

    let span = match (body.first(), body.last()) {
        (Some((first, _)), Some((last, _))) => Some(DateInterval::new(*first, *last)),
        _ => None,
    };

    let mut series = SeriesMap::new();
    if !body.is_empty() {
        for instrument in &instruments {
            let points: Series = body
                .iter()
                .map(|(date, values)| Point::new(*date, values[instrument.id]))
                .collect();
            series.insert(instrument.name.clone(), points);
        }
    }

    tracing::debug!(
        instruments = instruments.len(),
        rows = body.len(),
        "ingested table"
    );
    if nan_cells > 0 {
        tracing::warn!(nan_cells, "value cells could not be parsed and were set to NaN");
    }

    let dates = body.iter().map(|(date, _)| *date).collect();

    Ok(Dataset {
        series,
        instruments,
        dates,
        span,
        nan_cells,
    })
}
