//! # Unit Components
//!
//! Fine-grained tests for each building block of the prefetch engines,
//! followed by scenario and property tests of the assembled engines.

/// Fully-associative table and replacement policy tests.
pub mod table;






/// Configuration loading and validation tests.
pub mod config;

/// Statistics bookkeeping tests.
pub mod stats;

/// Randomized invariants of the engines.
pub mod properties;
