//! Table ingestion, cell canonicalization and date filtering

pub mod canonicalize;
pub mod filter;
pub mod ingest;

pub use canonicalize::{parse_date, parse_float};
pub use filter::{filter_series, filter_series_map};
pub use ingest::{ingest_rows, Dataset, IngestError};
