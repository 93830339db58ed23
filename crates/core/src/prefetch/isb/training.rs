//! Training Unit.
//!
//! Maps an instruction pointer to the cache line it referenced when it was
//! first tracked. A later access by the same PC forms a correlated pair
//! `(stored line, current line)` for the correlation learner.
//!
//! The stored line is not refreshed on a hit: every pair produced for a PC is
//! anchored to the line recorded when the PC entered the table. The anchor
//! only moves once the entry is evicted and the PC is tracked afresh.

use crate::common::addr::LineAddr;
use crate::table::AssocTable;

/// PC-indexed table of anchor lines with clock replacement.
#[derive(Debug, Clone)]
pub struct TrainingUnit {
    table: AssocTable<u64, LineAddr>,
}

impl TrainingUnit {
    /// Creates an empty training unit.
    ///
    /// # Arguments
    ///
    /// * `entries` - Number of PCs tracked simultaneously.
    pub fn new(entries: usize) -> Self {
        Self {
            table: AssocTable::new(entries),
        }
    }

    /// Observes `pc` accessing `current`.
    ///
    /// # Returns
    ///
    /// `Some((a, b))` when `pc` was already tracked, where `a` is its anchor
    /// line and `b` is `current`. `None` when `pc` was untracked; it is then
    /// inserted with `current` as its anchor.
    pub fn observe(&mut self, pc: u64, current: LineAddr) -> Option<(LineAddr, LineAddr)> {
        if let Some(slot) = self.table.find(pc) {
            return Some((*self.table.get(slot), current));
        }
        let slot = self.table.insert(pc);
        *self.table.get_mut(slot) = current;
        None
    }

    /// Anchor line recorded for `pc`, without touching replacement state.
    pub fn anchor(&self, pc: u64) -> Option<LineAddr> {
        self.table.peek(pc).copied()
    }

    /// Number of PCs currently tracked.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if no PC is tracked.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Forgets every PC.
    pub fn reset(&mut self) {
        self.table.reset();
    }
}
