//! Clock (Second-Chance) Replacement Policy.
//!
//! Each slot carries a single recency bit that is set whenever the slot is hit
//! or filled. A persistent hand sweeps the slots circularly: a slot with its
//! bit set gets a second chance (the bit is cleared and the hand moves on),
//! the first slot found with a clear bit is the victim and the hand stops just
//! past it.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `touch()`: O(1)
//!   - `victim()`: O(1) amortized, O(C) worst case when every bit is set
//! - **Space Complexity:** O(C) bits where C is the table capacity
//! - **Hardware Cost:** Minimal - one bit per entry plus a hand register
//! - **Best Case:** Working sets with a stable hot subset
//! - **Worst Case:** Every entry recently used (full sweep before eviction)

use super::ReplacementPolicy;

/// Clock policy state.
#[derive(Debug, Clone)]
pub struct ClockPolicy {
    /// Recency ("recently used") bit per slot.
    referenced: Vec<bool>,
    /// Slot the next sweep starts from.
    hand: usize,
}

impl ClockPolicy {
    /// Returns the current hand position.
    pub fn hand(&self) -> usize {
        self.hand
    }

    /// Returns whether `slot` currently has its recency bit set.
    pub fn is_referenced(&self, slot: usize) -> bool {
        self.referenced.get(slot).copied().unwrap_or(false)
    }

    fn advance(&mut self) {
        self.hand += 1;
        if self.hand >= self.referenced.len() {
            self.hand = 0;
        }
    }
}

impl ReplacementPolicy for ClockPolicy {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            referenced: vec![false; capacity.max(1)],
            hand: 0,
        }
    }

    fn touch(&mut self, slot: usize) {
        if let Some(bit) = self.referenced.get_mut(slot) {
            *bit = true;
        }
    }

    /// Sweeps from the hand, clearing recency bits, until an unreferenced
    /// slot is found.
    ///
    /// Terminates within two revolutions: the first clears every bit.
    fn victim(&mut self) -> usize {
        loop {
            let slot = self.hand;
            self.advance();
            if self.referenced[slot] {
                self.referenced[slot] = false;
            } else {
                return slot;
            }
        }
    }

    fn reset(&mut self) {
        self.referenced.fill(false);
        self.hand = 0;
    }
}
