//! Common utilities and types used throughout the prefetch engines.
//!
//! This module provides the building blocks shared by every component. It includes:
//! 1. **Address Types:** Strong types for physical line and structural addresses.
//! 2. **Constants:** Line geometry, mapping-group width and confidence bounds.
//! 3. **Error Handling:** Configuration and driver error types.

/// Address type definitions (line and structural addresses).
pub mod addr;

/// Common constants used throughout the engines.
pub mod constants;

/// Error types for configuration and the driver contract.
pub mod error;

pub use addr::{LineAddr, StructAddr, group_of};
pub use constants::{CONFIDENCE_MAX, LINE_SHIFT, MAPPINGS_PER_GROUP};
pub use error::{ConfigError, DriverError};
