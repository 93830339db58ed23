//! Global Engine Constants.
//!
//! This module defines constants shared by the prefetch engines. It includes:
//! 1. **Line Geometry:** Shift used to convert byte addresses to cache lines.
//! 2. **Mapping Geometry:** Width of an address-mapping group.
//! 3. **Confidence:** Bounds of the per-mapping trust counter.

/// Number of bits to shift to convert between bytes and cache lines (64-byte lines).
pub const LINE_SHIFT: u32 = 6;

/// Number of contiguous source addresses covered by one address-mapping group.
pub const MAPPINGS_PER_GROUP: usize = 16;

/// Confidence value of a mapping that has not been established.
pub const CONFIDENCE_INVALID: u8 = 0;

/// Confidence assigned to a freshly written mapping.
pub const CONFIDENCE_INITIAL: u8 = 1;

/// Saturation point of the confidence counter.
pub const CONFIDENCE_MAX: u8 = 3;
