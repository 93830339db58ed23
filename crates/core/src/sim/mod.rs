//! Harness-facing simulation interface.
//!
//! Provides the per-core driver through which a cache simulator initializes
//! engines, forwards accesses and fills, and collects statistics.

/// Per-core driver implementing the harness callback contract.
pub mod driver;

pub use driver::PrefetchDriver;
