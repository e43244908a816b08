//! Serializable analysis configuration.
//!
//! An analysis file names the SMA period, an optional date range, the
//! instruments to smooth and the groups to compare. It is validated against
//! a loaded dataset, which turns member names into instruments and fills in
//! defaults from the dataset's span.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use spreadlab_core::{Dataset, DateInterval, Group, SmaWindow};
use std::path::Path;
use thiserror::Error;

/// Inclusive bounds accepted for the SMA period.
pub const SMA_PERIOD_MIN: usize = 2;
pub const SMA_PERIOD_MAX: usize = 50;
pub const DEFAULT_SMA_PERIOD: usize = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("sma_period {0} is outside [{min}, {max}]", min = SMA_PERIOD_MIN, max = SMA_PERIOD_MAX)]
    SmaPeriodOutOfRange(usize),

    #[error("date range is inverted: {start} > {end}")]
    InvertedDateRange { start: NaiveDate, end: NaiveDate },

    #[error("dataset has no rows, so no date range can be chosen")]
    EmptyDataset,

    #[error(
        "unknown instrument '{name}'{}",
        .group.map(|g| format!(" in group {}", g + 1)).unwrap_or_default()
    )]
    UnknownInstrument { name: String, group: Option<usize> },
}

/// Analysis parameters as written in the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    #[serde(default = "default_sma_period")]
    pub sma_period: usize,

    #[serde(default)]
    pub sma_window: SmaWindow,

    /// Restrict the analysis to this range; defaults to the dataset span.
    #[serde(default)]
    pub date_range: Option<DateRangeConfig>,

    /// Instruments to compute SMA series for; empty means all.
    #[serde(default)]
    pub instruments: Vec<String>,

    /// Seed for deterministic colours past the palette; random when absent.
    #[serde(default)]
    pub color_seed: Option<u64>,

    #[serde(default)]
    pub groups: Vec<GroupConfig>,
}

fn default_sma_period() -> usize {
    DEFAULT_SMA_PERIOD
}

/// Either bound may be omitted and is then taken from the dataset span.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DateRangeConfig {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GroupConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub members: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sma_period: DEFAULT_SMA_PERIOD,
            sma_window: SmaWindow::default(),
            date_range: None,
            instruments: Vec::new(),
            color_seed: None,
            groups: Vec::new(),
        }
    }
}

/// Configuration checked against a dataset and ready to run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub sma_period: usize,
    pub sma_window: SmaWindow,
    pub interval: DateInterval,
    pub sma_instruments: Vec<String>,
    pub groups: Vec<Group>,
    pub color_seed: Option<u64>,
}

impl AnalysisConfig {
    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Validate against `dataset` and resolve names and defaults.
    pub fn resolve(&self, dataset: &Dataset) -> Result<ResolvedConfig, ConfigError> {
        if !(SMA_PERIOD_MIN..=SMA_PERIOD_MAX).contains(&self.sma_period) {
            return Err(ConfigError::SmaPeriodOutOfRange(self.sma_period));
        }

        let span = dataset.span.ok_or(ConfigError::EmptyDataset)?;
        let range = self.date_range.unwrap_or_default();
        let interval = DateInterval::new(
            range.start.unwrap_or(span.start),
            range.end.unwrap_or(span.end),
        );
        if interval.is_inverted() {
            return Err(ConfigError::InvertedDateRange {
                start: interval.start,
                end: interval.end,
            });
        }

        let sma_instruments = if self.instruments.is_empty() {
            dataset.instruments.iter().map(|i| i.name.clone()).collect()
        } else {
            for name in &self.instruments {
                if dataset.instrument(name).is_none() {
                    return Err(ConfigError::UnknownInstrument {
                        name: name.clone(),
                        group: None,
                    });
                }
            }
            self.instruments.clone()
        };

        let mut groups = Vec::with_capacity(self.groups.len());
        for (ordinal, group) in self.groups.iter().enumerate() {
            let mut members = Vec::with_capacity(group.members.len());
            for name in &group.members {
                let instrument =
                    dataset
                        .instrument(name)
                        .ok_or_else(|| ConfigError::UnknownInstrument {
                            name: name.clone(),
                            group: Some(ordinal),
                        })?;
                members.push(instrument.clone());
            }
            groups.push(Group {
                name: group.name.clone(),
                members,
            });
        }

        Ok(ResolvedConfig {
            sma_period: self.sma_period,
            sma_window: self.sma_window,
            interval,
            sma_instruments,
            groups,
            color_seed: self.color_seed,
        })
    }
}
