//! Irregular-stream address-correlation prefetch engine.
//!
//! This crate implements the prefetch decision logic a cache simulator
//! attaches to a cache level. It includes:
//! 1. **Tables:** A generic fully-associative table with clock or round-robin replacement.
//! 2. **ISB:** Training unit, structural allocator, PS/SP address-mapping caches,
//!    correlation learner and lookahead generator.
//! 3. **Stride FSM:** A per-PC stride predictor with a four-state confidence automaton.
//! 4. **Driver:** Per-core lifecycle, MSHR-based fill-level selection and statistics.
//!
//! The engines only decide which lines to prefetch and into which level; the
//! harness performs the fetches.

/// Common types and constants (line/structural addresses, errors).
pub mod common;
/// Engine configuration (defaults, validation, JSON loading).
pub mod config;
/// Prefetch engines and the request types they produce.
pub mod prefetch;
/// Harness-facing driver.
pub mod sim;
/// Per-engine statistics collection and reporting.
pub mod stats;
/// Fully-associative tables and replacement policies.
pub mod table;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Prefetch engine interface and request types.
pub use crate::prefetch::{FillLevel, MemAccess, MshrProbe, PrefetchRequest, Prefetcher};
/// Per-core driver; construct with `PrefetchDriver::new`.
pub use crate::sim::PrefetchDriver;
