//! SpreadLab Core — time-series analytics for comparing groups of instruments.
//!
//! This crate contains the pure analytics engine:
//! - Domain types (points, series maps, instruments, groups, date intervals)
//! - Wide-table ingestion into per-instrument series
//! - Inclusive date-range filtering
//! - Centered simple moving average
//! - Cross-sectional group statistics (min, max, mean, dispersion)
//! - Synthetic per-group overview candles and their palette
//!
//! Every operation is a function over borrowed, immutable inputs that returns
//! fresh values. Nothing here does I/O or keeps state between calls.

pub mod data;
pub mod domain;
pub mod indicators;
pub mod palette;
pub mod stats;

pub use data::{filter_series, filter_series_map, ingest_rows, Dataset, IngestError};
pub use domain::{DateInterval, Group, Instrument, Point, Series, SeriesMap};
pub use indicators::{centered_sma, CenteredSma, SmaWindow};
pub use palette::{ColorSource, Palette, RandomColors, Rgb, SeededColors};
pub use stats::{group_stats, synthesize_summaries, GroupStats, GroupSummaryRecord};
