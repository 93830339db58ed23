//! Structural Address Allocator.
//!
//! Carves fresh regions out of the structural address space. Regions are
//! never reclaimed; the counter only moves forward until the engine is reset.

use crate::common::addr::StructAddr;

/// Monotonic bump allocator over the structural address space.
#[derive(Debug, Clone)]
pub struct StructuralAllocator {
    next: u64,
    chunk: u64,
}

impl StructuralAllocator {
    /// Creates an allocator handing out regions of `chunk` addresses.
    pub const fn new(chunk: u64) -> Self {
        Self { next: 0, chunk }
    }

    /// Reserves a new region and returns its first address.
    pub fn allocate(&mut self) -> StructAddr {
        let base = StructAddr(self.next);
        self.next = self.next.wrapping_add(self.chunk);
        base
    }

    /// First address of the region the next `allocate` returns.
    pub const fn peek(&self) -> StructAddr {
        StructAddr(self.next)
    }

    /// Region size.
    pub const fn chunk(&self) -> u64 {
        self.chunk
    }

    /// Restarts allocation from zero.
    pub fn reset(&mut self) {
        self.next = 0;
    }
}
