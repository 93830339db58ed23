//! Configuration system for the prefetch engines.
//!
//! This module defines the configuration structures used to parameterize the
//! engines. It provides:
//! 1. **Defaults:** Baseline table capacities, lookahead degree and fill threshold.
//! 2. **Structures:** Hierarchical config for general, ISB, stride and fill-policy settings.
//! 3. **Enums:** Selection of the prefetch engine instantiated per core.
//!
//! Configuration is supplied as JSON by the harness, or built with `Config::default()`.

use serde::Deserialize;

use crate::common::constants::{CONFIDENCE_MAX, LINE_SHIFT, MAPPINGS_PER_GROUP};
use crate::common::error::ConfigError;

/// Default configuration constants for the engines.
mod defaults {
    /// Number of simulated cores driven by one driver.
    pub const CORES: usize = 1;

    /// PC -> last-address training table entries.
    pub const TRAINING_ENTRIES: usize = 128;

    /// Groups held by each of the PS and SP address-mapping caches.
    pub const AMC_ENTRIES: usize = 128;

    /// Structural addresses reserved per freshly allocated region.
    pub const CHUNK_SIZE: u64 = 256;

    /// Structural neighbours scanned per access.
    pub const DEGREE: usize = 2;

    /// Entries in the per-PC stride table.
    pub const STRIDE_ENTRIES: usize = 16;

    /// MSHR occupancy above which prefetches are redirected to the LLC.
    pub const MSHR_THRESHOLD: usize = 8;
}

/// Prefetch engine instantiated for every core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PrefetcherKind {
    /// No prefetching; every access yields zero requests.
    None,
    /// Irregular stream buffer (structural address remapping).
    #[default]
    #[serde(alias = "ISB")]
    Isb,
    /// Per-PC stride predictor driven by a four-state confidence automaton.
    StrideFsm,
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use isb_core::config::{Config, PrefetcherKind};
///
/// let json = r#"{
///     "general": { "cores": 2 },
///     "prefetcher": "StrideFsm",
///     "fill": { "mshr_threshold": 4 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.cores, 2);
/// assert_eq!(config.prefetcher, PrefetcherKind::StrideFsm);
/// assert_eq!(config.isb.degree, 2);
/// assert_eq!(config.fill.mshr_threshold, 4);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Core count and line geometry.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Engine selection.
    #[serde(default)]
    pub prefetcher: PrefetcherKind,
    /// Irregular stream buffer parameters.
    #[serde(default)]
    pub isb: IsbConfig,
    /// Stride FSM parameters.
    #[serde(default)]
    pub stride: StrideConfig,
    /// Fill-level selection parameters.
    #[serde(default)]
    pub fill: FillConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// Missing sections and fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any validation
    /// error reported by [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every engine can be built from this configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.cores == 0 {
            return Err(ConfigError::ZeroCores);
        }
        if !(1..=12).contains(&self.general.line_shift) {
            return Err(ConfigError::InvalidLineShift(self.general.line_shift));
        }
        self.isb.validate()?;
        self.stride.validate()
    }
}

/// General settings shared by every engine.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Number of simulated cores; each gets an independent engine.
    #[serde(default = "GeneralConfig::default_cores")]
    pub cores: usize,

    /// Log2 of the cache line size in bytes.
    #[serde(default = "GeneralConfig::default_line_shift")]
    pub line_shift: u32,
}

impl GeneralConfig {
    fn default_cores() -> usize {
        defaults::CORES
    }

    fn default_line_shift() -> u32 {
        LINE_SHIFT
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            cores: Self::default_cores(),
            line_shift: Self::default_line_shift(),
        }
    }
}

/// Irregular stream buffer parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct IsbConfig {
    /// Entries in the PC -> last-address training unit.
    #[serde(default = "IsbConfig::default_training_entries")]
    pub training_entries: usize,

    /// Mapping groups per address-mapping cache (PS and SP each).
    #[serde(default = "IsbConfig::default_amc_entries")]
    pub amc_entries: usize,

    /// Structural addresses reserved per new region.
    #[serde(default = "IsbConfig::default_chunk_size")]
    pub chunk_size: u64,

    /// Structural neighbours scanned per access.
    #[serde(default = "IsbConfig::default_degree")]
    pub degree: usize,

    /// Saturation point of mapping confidence.
    #[serde(default = "IsbConfig::default_max_confidence")]
    pub max_confidence: u8,
}

impl IsbConfig {
    fn default_training_entries() -> usize {
        defaults::TRAINING_ENTRIES
    }

    fn default_amc_entries() -> usize {
        defaults::AMC_ENTRIES
    }

    fn default_chunk_size() -> u64 {
        defaults::CHUNK_SIZE
    }

    fn default_degree() -> usize {
        defaults::DEGREE
    }

    fn default_max_confidence() -> u8 {
        CONFIDENCE_MAX
    }

    /// Checks capacities, chunk size, degree and confidence ceiling.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.training_entries == 0 {
            return Err(ConfigError::ZeroCapacity { table: "training" });
        }
        if self.amc_entries == 0 {
            return Err(ConfigError::ZeroCapacity { table: "amc" });
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.degree == 0 || self.degree >= MAPPINGS_PER_GROUP {
            return Err(ConfigError::InvalidDegree {
                degree: self.degree,
                max: MAPPINGS_PER_GROUP,
            });
        }
        if self.max_confidence == 0 || self.max_confidence > CONFIDENCE_MAX {
            return Err(ConfigError::InvalidConfidence(self.max_confidence));
        }
        Ok(())
    }
}

impl Default for IsbConfig {
    fn default() -> Self {
        Self {
            training_entries: Self::default_training_entries(),
            amc_entries: Self::default_amc_entries(),
            chunk_size: Self::default_chunk_size(),
            degree: Self::default_degree(),
            max_confidence: Self::default_max_confidence(),
        }
    }
}

/// Stride FSM predictor parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct StrideConfig {
    /// Entries in the per-PC stride table (round-robin replacement).
    #[serde(default = "StrideConfig::default_table_entries")]
    pub table_entries: usize,
}

impl StrideConfig {
    fn default_table_entries() -> usize {
        defaults::STRIDE_ENTRIES
    }

    /// Checks the table capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCapacity`] for an empty table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table_entries == 0 {
            return Err(ConfigError::ZeroCapacity { table: "stride" });
        }
        Ok(())
    }
}

impl Default for StrideConfig {
    fn default() -> Self {
        Self {
            table_entries: Self::default_table_entries(),
        }
    }
}

/// Fill-level selection parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FillConfig {
    /// MSHR occupancy strictly above which prefetches fill the far level.
    #[serde(default = "FillConfig::default_mshr_threshold")]
    pub mshr_threshold: usize,
}

impl FillConfig {
    fn default_mshr_threshold() -> usize {
        defaults::MSHR_THRESHOLD
    }
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            mshr_threshold: Self::default_mshr_threshold(),
        }
    }
}
