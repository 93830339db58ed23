//! Configuration and Driver error definitions.
//!
//! The prediction logic itself has no failure modes: every table miss is an
//! expected outcome and is modelled with `Option`. Errors only arise at the
//! edges of the crate:
//! 1. **Configuration:** Rejecting parameter sets the engines cannot be built from.
//! 2. **Driver:** Reporting harness calls that violate the per-core lifecycle.

use thiserror::Error;

/// Reasons a [`Config`](crate::config::Config) is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A table was configured with no entries.
    #[error("table `{table}` must have at least one entry")]
    ZeroCapacity {
        /// Name of the offending table.
        table: &'static str,
    },

    /// The structural chunk size is zero, so every region would collide.
    #[error("structural chunk size must be non-zero")]
    ZeroChunkSize,

    /// The lookahead degree is zero or does not fit inside a mapping group.
    #[error("prefetch degree {degree} must be in 1..{max}")]
    InvalidDegree {
        /// Configured degree.
        degree: usize,
        /// Exclusive upper bound (the mapping group width).
        max: usize,
    },

    /// The confidence ceiling is zero or above the supported counter width.
    #[error("max confidence {0} must be in 1..=3")]
    InvalidConfidence(u8),

    /// The line shift does not describe a sensible cache line.
    #[error("line shift {0} must be in 1..=12")]
    InvalidLineShift(u32),

    /// The driver was configured for zero cores.
    #[error("core count must be non-zero")]
    ZeroCores,

    /// The JSON document could not be parsed.
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Harness calls that violate the per-core callback contract.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    /// The core id is outside the configured core count.
    #[error("core {core} out of range (driver has {cores} cores)")]
    UnknownCore {
        /// Requested core id.
        core: usize,
        /// Number of cores the driver was built for.
        cores: usize,
    },

    /// A callback arrived before `initialize` for this core.
    #[error("core {0} has not been initialized")]
    NotInitialized(usize),

    /// `initialize` was called a second time for this core.
    #[error("core {0} is already initialized")]
    AlreadyInitialized(usize),
}
