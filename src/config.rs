// In: src/config.rs

//! The single source of truth for all strata pipeline configuration.
//!
//! This module defines the unified `StrataConfig` struct, which is designed to be
//! created once at the application boundary (e.g. from a JSON file) and then
//! passed down through the system via a shared, read-only `Arc<StrataConfig>`.

use serde::{Deserialize, Serialize};

use crate::error::StrataError;

//==================================================================================
// I. Core Configuration Enums & Structs
//==================================================================================

/// Defines the trade-off between compression speed and final size for the
/// external compressor stage of every cycle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CompressionProfile {
    /// Prioritizes speed over size. Uses a low Zstd level.
    Fast,

    /// A balance between speed and size. This is the recommended default.
    #[default]
    Balanced,

    /// Prioritizes the smallest possible output at the cost of CPU time.
    HighCompression,
}

impl CompressionProfile {
    /// The Zstd level used for this profile.
    pub fn zstd_level(self) -> i32 {
        match self {
            CompressionProfile::Fast => 1,
            CompressionProfile::Balanced => 3,
            CompressionProfile::HighCompression => 19,
        }
    }
}

/// Which policy the `planner` uses to map an analysis report to a codec.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// **Default:** run length, then alphabet size, then entropy.
    #[default]
    Analysis,

    /// Rotates through a fixed codec schedule keyed on the cycle number.
    CycleIndex,

    /// Chooses by the coarse data-type classification first.
    DataType,
}

/// Tunables for the repeated-substring scan of the statistical analyzer.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct AnalyzerConfig {
    #[serde(default = "default_min_pattern_len")]
    pub min_pattern_len: usize,

    #[serde(default = "default_max_pattern_len")]
    pub max_pattern_len: usize,

    /// A substring is reported only if it occurs at least this many times.
    #[serde(default = "default_min_occurrences")]
    pub min_occurrences: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_pattern_len: default_min_pattern_len(),
            max_pattern_len: default_max_pattern_len(),
            min_occurrences: default_min_occurrences(),
        }
    }
}

/// Defines settings for the logging sink.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitoringConfig {
    /// Emit `debug`-level analysis detail and metrics in addition to `info`.
    #[serde(default)]
    pub verbose: bool,

    /// Append log lines to this file instead of stderr.
    #[serde(default)]
    pub log_file: Option<String>,
}

//==================================================================================
// II. The Unified StrataConfig
//==================================================================================

/// The single, unified configuration for a strata pipeline run.
/// This struct is created once and shared throughout the system via an `Arc`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct StrataConfig {
    /// The profile guiding the external compressor level.
    #[serde(default)]
    pub profile: CompressionProfile,

    /// The codec selection policy applied every cycle.
    #[serde(default)]
    pub selection: SelectionStrategy,

    /// Upper bound on transform+compress cycles for `run_pipeline`.
    #[serde(default = "default_max_cycles")]
    pub max_cycles: usize,

    /// The pipeline stops once a cycle's compressed output is smaller than this.
    #[serde(default = "default_size_floor")]
    pub size_floor: usize,

    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Caps the pattern length searched by the cycle-fold codec. `None` searches
    /// every length up to half the input.
    #[serde(default = "default_max_cycle_pattern_len")]
    pub max_cycle_pattern_len: Option<usize>,

    /// Configuration for logging.
    #[serde(default)]
    pub monitoring: Option<MonitoringConfig>,
}

impl Default for StrataConfig {
    fn default() -> Self {
        Self {
            profile: CompressionProfile::default(),
            selection: SelectionStrategy::default(),
            max_cycles: default_max_cycles(),
            size_floor: default_size_floor(),
            analyzer: AnalyzerConfig::default(),
            max_cycle_pattern_len: default_max_cycle_pattern_len(),
            monitoring: None,
        }
    }
}

impl StrataConfig {
    /// Parses a JSON document, filling every missing field with its default,
    /// and rejects settings the analyzer cannot honor.
    pub fn from_json_str(json: &str) -> Result<Self, StrataError> {
        let config: StrataConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), StrataError> {
        let a = &self.analyzer;
        if a.min_pattern_len == 0 || a.min_pattern_len > a.max_pattern_len {
            return Err(StrataError::ConfigError(format!(
                "analyzer pattern lengths must satisfy 1 <= min <= max, got {}..={}",
                a.min_pattern_len, a.max_pattern_len
            )));
        }
        if a.min_occurrences == 0 {
            return Err(StrataError::ConfigError(
                "analyzer.min_occurrences must be at least 1".to_string(),
            ));
        }
        if self.max_cycle_pattern_len == Some(0) {
            return Err(StrataError::ConfigError(
                "max_cycle_pattern_len must be positive or null".to_string(),
            ));
        }
        Ok(())
    }

    pub fn zstd_level(&self) -> i32 {
        self.profile.zstd_level()
    }
}

fn default_max_cycles() -> usize {
    8
}

fn default_size_floor() -> usize {
    100
}

fn default_min_pattern_len() -> usize {
    2
}

fn default_max_pattern_len() -> usize {
    10
}

fn default_min_occurrences() -> usize {
    3
}

fn default_max_cycle_pattern_len() -> Option<usize> {
    Some(1024)
}
