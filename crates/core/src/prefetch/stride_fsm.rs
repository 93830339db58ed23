//! Stride FSM Prefetcher.
//!
//! A per-PC stride detector. Each tracked PC remembers its previous byte
//! address and last stride, and walks a four-state automaton driven by
//! whether the newest stride matches the remembered one:
//!
//! | State          | stride matches   | stride differs                   |
//! |----------------|------------------|----------------------------------|
//! | `Initial`      | -> `Steady`      | -> `Transient`, stride updated    |
//! | `Transient`    | -> `Steady`      | -> `NoPrediction`, stride updated |
//! | `NoPrediction` | -> `Transient`   | stride updated                    |
//! | `Steady`       | stays `Steady`   | -> `Initial`                      |
//!
//! One prefetch at `addr + stride` is issued while an entry is `Steady`.
//!
//! # Performance
//!
//! - **Time Complexity:** O(T) per access (tag scan), T = table entries
//! - **Space Complexity:** O(T)
//! - **Best Case:** Loops walking arrays with a constant stride per load
//! - **Worst Case:** More live PCs than entries (round-robin thrashing)

use super::{FillPolicy, MemAccess, MshrProbe, PrefetchRequest, Prefetcher};
use crate::config::{Config, StrideConfig};
use crate::stats::PrefetchStats;
use crate::table::AssocTable;
use crate::table::policies::RoundRobinPolicy;

/// Confidence state of a stride entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StrideState {
    /// Freshly allocated or just fell out of `Steady`.
    #[default]
    Initial,
    /// One mismatch seen; a match promotes to `Steady`.
    Transient,
    /// Stride confirmed; prefetches are issued.
    Steady,
    /// Repeated mismatches; no prediction until the stride repeats.
    NoPrediction,
}

impl StrideState {
    /// Applies one observation to the automaton.
    ///
    /// # Returns
    ///
    /// The next state and whether the remembered stride must be replaced.
    pub const fn next(self, matches: bool) -> (Self, bool) {
        match (self, matches) {
            (Self::Initial | Self::Transient, true) => (Self::Steady, false),
            (Self::Initial, false) => (Self::Transient, true),
            (Self::Transient, false) => (Self::NoPrediction, true),
            (Self::NoPrediction, true) => (Self::Transient, false),
            (Self::NoPrediction, false) => (Self::NoPrediction, true),
            (Self::Steady, true) => (Self::Steady, false),
            (Self::Steady, false) => (Self::Initial, false),
        }
    }
}

/// Entry of the per-PC stride table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StrideEntry {
    /// Byte address of the PC's previous access.
    pub prev_addr: u64,
    /// Remembered stride in bytes.
    pub stride: i64,
    /// Automaton state.
    pub state: StrideState,
}

/// Stride FSM prefetcher state for one core.
#[derive(Debug, Clone)]
pub struct StrideFsmPrefetcher {
    table: AssocTable<u64, StrideEntry, RoundRobinPolicy>,
    fill: FillPolicy,
    stats: PrefetchStats,
}

impl StrideFsmPrefetcher {
    /// Creates a stride prefetcher.
    ///
    /// # Arguments
    ///
    /// * `config` - Table capacity.
    /// * `fill` - Fill-level decision applied to every prefetch.
    pub fn new(config: &StrideConfig, fill: FillPolicy) -> Self {
        Self {
            table: AssocTable::new(config.table_entries),
            fill,
            stats: PrefetchStats::default(),
        }
    }

    /// Creates a stride prefetcher from a full configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.stride, config.fill.into())
    }

    /// Entry tracked for `pc`, without touching replacement state.
    pub fn entry(&self, pc: u64) -> Option<&StrideEntry> {
        self.table.peek(pc)
    }

    /// Updates the entry for `pc` with `addr`, allocating on a miss.
    ///
    /// # Returns
    ///
    /// The entry after the update.
    fn train(&mut self, pc: u64, addr: u64) -> StrideEntry {
        let Some(slot) = self.table.find(pc) else {
            let slot = self.table.insert(pc);
            let entry = self.table.get_mut(slot);
            entry.prev_addr = addr;
            return *entry;
        };

        self.stats.training_hits += 1;
        let entry = self.table.get_mut(slot);
        let current = addr.wrapping_sub(entry.prev_addr) as i64;
        let (state, replace) = entry.state.next(current == entry.stride);
        if replace {
            entry.stride = current;
        }
        entry.state = state;
        entry.prev_addr = addr;
        *entry
    }
}

impl Prefetcher for StrideFsmPrefetcher {
    fn name(&self) -> &'static str {
        "stride-fsm"
    }

    fn operate(&mut self, access: MemAccess, probe: &dyn MshrProbe) -> Vec<PrefetchRequest> {
        self.stats.accesses += 1;
        if access.cache_hit {
            self.stats.cache_hits += 1;
        }

        let entry = self.train(access.ip, access.addr);
        if entry.state != StrideState::Steady {
            return Vec::new();
        }
        let target = access.addr.wrapping_add_signed(entry.stride);
        vec![self.fill.request(access.addr, target, probe, &mut self.stats)]
    }

    fn reset(&mut self) {
        self.table.reset();
        self.stats.clear();
    }

    fn stats(&self) -> &PrefetchStats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut PrefetchStats {
        &mut self.stats
    }
}
