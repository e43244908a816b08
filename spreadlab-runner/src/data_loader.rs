//! Table loading for the runner.
//!
//! Reads a wide CSV file (date column, then one column per instrument) into
//! string cells and hands it to core ingestion. The loaded dataset carries a
//! BLAKE3 fingerprint so exported reports can be traced back to the exact
//! input they were computed from.

use spreadlab_core::{ingest_rows, Dataset, IngestError};
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid table: {0}")]
    Ingest(#[from] IngestError),
}

/// A dataset together with where it came from.
#[derive(Debug)]
pub struct LoadedData {
    pub dataset: Dataset,
    /// BLAKE3 over names, dates and value bits in column order.
    pub dataset_hash: String,
    pub source: Option<PathBuf>,
}

/// Read raw CSV records without interpreting the header.
///
/// Rows may differ in length; shape checks belong to ingestion, which knows
/// which differences are acceptable.
pub fn read_table<R: Read>(reader: R) -> Result<Vec<Vec<String>>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Load and ingest a CSV file.
pub fn load_dataset(path: &Path) -> Result<LoadedData, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut loaded = load_from_reader(file)?;
    loaded.source = Some(path.to_path_buf());
    Ok(loaded)
}

/// Load and ingest CSV from any reader.
pub fn load_from_reader<R: Read>(reader: R) -> Result<LoadedData, LoadError> {
    let rows = read_table(reader)?;
    let dataset = ingest_rows(&rows)?;
    let dataset_hash = compute_dataset_hash(&dataset);

    tracing::info!(
        instruments = dataset.instruments.len(),
        rows = dataset.row_count(),
        nan_cells = dataset.nan_cells,
        hash = %&dataset_hash[..12],
        "loaded dataset"
    );

    Ok(LoadedData {
        dataset,
        dataset_hash,
        source: None,
    })
}

/// Compute a deterministic hash of a dataset.
///
/// Instruments are visited in column order, so reordering columns changes
/// the hash even when the values are the same.
pub fn compute_dataset_hash(dataset: &Dataset) -> String {
    let mut hasher = blake3::Hasher::new();

    for instrument in &dataset.instruments {
        hasher.update(instrument.name.as_bytes());
        hasher.update(&[0]);
        for p in dataset.series.get(&instrument.name) {
            hasher.update(p.time.to_string().as_bytes());
            hasher.update(&p.value.to_le_bytes());
        }
    }

    hasher.finalize().to_hex().to_string()
}
