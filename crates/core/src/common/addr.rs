//! Cache-line and Structural Address types.
//!
//! This module defines strong types for the two address spaces the ISB engine
//! translates between. It provides the following:
//! 1. **Type Safety:** Distinguishes physical line addresses from structural addresses.
//! 2. **Line Conversion:** Helpers to move between byte and cache-line granularity.
//! 3. **Group Geometry:** Splits an address into its mapping-group tag and slot.

use std::fmt;

use super::constants::MAPPINGS_PER_GROUP;

/// A physical cache-line address (byte address shifted right by the line shift).
///
/// All engine state is keyed by line address, never by byte address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineAddr(pub u64);

/// An address in the engine-private structural address space.
///
/// Structural addresses are handed out in chunks by the structural allocator
/// and never alias physical addresses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StructAddr(pub u64);

impl LineAddr {
    /// Converts a byte address into a line address.
    ///
    /// # Arguments
    ///
    /// * `addr` - The byte address.
    /// * `line_shift` - Log2 of the line size in bytes.
    #[inline(always)]
    pub const fn from_byte(addr: u64, line_shift: u32) -> Self {
        Self(addr >> line_shift)
    }

    /// Returns the first byte address of this line.
    #[inline(always)]
    pub const fn to_byte(self, line_shift: u32) -> u64 {
        self.0 << line_shift
    }

    /// Returns the raw line number.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }
}

impl StructAddr {
    /// Returns the raw structural value.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }
}

/// Splits a mapping-cache source address into `(group tag, slot within group)`.
#[inline(always)]
pub const fn group_of(source: u64) -> (u64, usize) {
    (
        source / MAPPINGS_PER_GROUP as u64,
        (source % MAPPINGS_PER_GROUP as u64) as usize,
    )
}

impl fmt::Display for LineAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{:#x}", self.0)
    }
}

impl fmt::Display for StructAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{:#x}", self.0)
    }
}
