//! Analysis runner: config + dataset in, `AnalysisReport` out.

use crate::config::{AnalysisConfig, ConfigError, ResolvedConfig};
use crate::data_loader::{load_dataset, LoadError, LoadedData};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use spreadlab_core::{
    filter_series_map, group_stats, synthesize_summaries, CenteredSma, ColorSource, DateInterval,
    GroupStats, GroupSummaryRecord, Palette, RandomColors, SeededColors, Series, SmaWindow,
};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Data(#[from] LoadError),
}

/// Current report schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Point and NaN counts of one instrument over the whole dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentSummary {
    pub name: String,
    pub points: usize,
    pub nan_points: usize,
}

impl InstrumentSummary {
    pub fn is_degraded(&self) -> bool {
        self.nan_points > 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupReport {
    pub name: String,
    pub members: Vec<String>,
    pub stats: GroupStats,
}

/// Everything one analysis run produced.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub schema_version: u32,
    pub dataset_hash: String,
    pub source: Option<String>,
    pub instruments: Vec<InstrumentSummary>,
    /// Full date span of the dataset.
    pub span: DateInterval,
    /// Range the analysis was restricted to.
    pub interval: DateInterval,
    pub sma_period: usize,
    pub sma_window: SmaWindow,
    /// SMA per instrument over the series restricted to `interval`.
    /// Points outside the range never enter a window.
    pub sma: BTreeMap<String, Series>,
    /// Group statistics over observations within `interval` only.
    pub groups: Vec<GroupReport>,
    /// Overview records over observations within `interval` only.
    pub summaries: Vec<GroupSummaryRecord>,
}

/// Load `data_path`, optionally apply `config_path`, and run the analysis.
pub fn run_analysis_files(
    data_path: &Path,
    config_path: Option<&Path>,
) -> Result<AnalysisReport, RunError> {
    let config = match config_path {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };
    let loaded = load_dataset(data_path)?;
    run_analysis(&loaded, &config)
}

/// Validate `config` against the loaded dataset and run the analysis.
pub fn run_analysis(
    loaded: &LoadedData,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, RunError> {
    let resolved = config.resolve(&loaded.dataset)?;
    let mut fallback: Box<dyn ColorSource> = match resolved.color_seed {
        Some(seed) => Box::new(SeededColors::new(seed)),
        None => Box::new(RandomColors::new()),
    };
    Ok(build_report(loaded, &resolved, &Palette::default(), &mut *fallback))
}

/// Assemble a report from an already resolved configuration.
///
/// Instrument counts cover the whole dataset. SMA series, group statistics
/// and overview records are all computed on the series filtered to
/// `resolved.interval`; pass the dataset span to analyse everything.
pub fn build_report(
    loaded: &LoadedData,
    resolved: &ResolvedConfig,
    palette: &Palette,
    fallback: &mut dyn ColorSource,
) -> AnalysisReport {
    let dataset = &loaded.dataset;
    // resolve() refuses header-only datasets, so span is set here
    let span = dataset.span.unwrap_or(resolved.interval);
    let filtered = filter_series_map(&dataset.series, &resolved.interval);

    let instruments = dataset
        .instruments
        .iter()
        .map(|i| {
            let points = dataset.series.get(&i.name);
            InstrumentSummary {
                name: i.name.clone(),
                points: points.len(),
                nan_points: points.iter().filter(|p| p.value.is_nan()).count(),
            }
        })
        .collect();

    let sma_calc = CenteredSma::new(resolved.sma_period).with_window(resolved.sma_window);
    let sma: BTreeMap<String, Series> = resolved
        .sma_instruments
        .par_iter()
        .map(|name| (name.clone(), sma_calc.compute(filtered.get(name))))
        .collect();

    let groups = resolved
        .groups
        .iter()
        .enumerate()
        .map(|(ordinal, group)| {
            let members = group.member_names();
            let stats = group_stats(&filtered, &members);
            if stats.is_degraded() {
                tracing::warn!(group = ordinal, "group statistics contain NaN");
            }
            GroupReport {
                name: group.display_name(ordinal),
                members: members.into_iter().map(str::to_string).collect(),
                stats,
            }
        })
        .collect();

    let summaries = synthesize_summaries(&resolved.groups, &filtered, palette, fallback);

    tracing::info!(
        start = %resolved.interval.start,
        end = %resolved.interval.end,
        sma_series = sma.len(),
        groups = resolved.groups.len(),
        summaries = summaries.len(),
        "analysis complete"
    );

    AnalysisReport {
        schema_version: SCHEMA_VERSION,
        dataset_hash: loaded.dataset_hash.clone(),
        source: loaded.source.as_ref().map(|p| p.display().to_string()),
        instruments,
        span,
        interval: resolved.interval,
        sma_period: resolved.sma_period,
        sma_window: resolved.sma_window,
        sma,
        groups,
        summaries,
    }
}
