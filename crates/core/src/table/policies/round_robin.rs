//! Round-Robin Replacement Policy.
//!
//! Evicts slots in strict circular order regardless of how recently they were
//! hit. Only a fill advances the pointer.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `touch()`: O(1)
//!   - `victim()`: O(1)
//! - **Space Complexity:** O(1)
//! - **Hardware Cost:** Minimal - a single counter
//! - **Best Case:** Small tables with short-lived entries
//! - **Worst Case:** Hot entries are evicted on schedule anyway

use super::ReplacementPolicy;

/// Round-robin policy state.
#[derive(Debug, Clone)]
pub struct RoundRobinPolicy {
    /// Slot handed out by the next `victim()` call.
    next: usize,
    /// Number of slots in the table.
    capacity: usize,
}

impl ReplacementPolicy for RoundRobinPolicy {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            next: 0,
            capacity: capacity.max(1),
        }
    }

    /// Hits do not change the eviction order.
    fn touch(&mut self, _slot: usize) {}

    fn victim(&mut self) -> usize {
        let slot = self.next;
        self.next = (self.next + 1) % self.capacity;
        slot
    }

    fn reset(&mut self) {
        self.next = 0;
    }
}
