//! SpreadLab Runner — file loading, analysis configuration, reports.
//!
//! This crate builds on `spreadlab-core` to provide:
//! - CSV decoding into the core's row table, with a dataset fingerprint
//! - TOML analysis configuration validated against a dataset
//! - An analysis runner producing a versioned `AnalysisReport`
//! - JSON and CSV export

pub mod config;
pub mod data_loader;
pub mod export;
pub mod report;

pub use config::{
    AnalysisConfig, ConfigError, DateRangeConfig, GroupConfig, ResolvedConfig, SMA_PERIOD_MAX,
    SMA_PERIOD_MIN,
};
pub use data_loader::{
    compute_dataset_hash, load_dataset, load_from_reader, read_table, LoadError, LoadedData,
};
pub use export::{export_json, export_summaries_csv, write_report};
pub use report::{
    build_report, run_analysis, run_analysis_files, AnalysisReport, GroupReport,
    InstrumentSummary, RunError, SCHEMA_VERSION,
};
