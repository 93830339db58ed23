//! Irregular Stream Buffer.
//!
//! An address-correlation prefetcher that learns orderings which have no fixed
//! stride in physical space. Lines that a PC touches one after another are
//! given consecutive addresses in a synthetic structural space; prefetching is
//! then plain forward lookahead in that space, translated back to physical
//! lines.
//!
//! The engine is built from four parts:
//! 1. **Training Unit:** PC -> anchor line; produces correlated `(A, B)` pairs.
//! 2. **Structural Allocator:** Hands out fresh structural regions.
//! 3. **PS / SP caches:** Physical <-> structural mappings with confidence counters.
//! 4. **Learner and Generator:** Update the mappings and emit lookahead prefetches.
//!
//! # Performance
//!
//! - **Time Complexity:** O(T + M) per access, where T is the training-table
//!   capacity and M the mapping-cache capacity (linear tag scans)
//! - **Space Complexity:** O(T + 2 * M * 16) mappings
//! - **Best Case:** Pointer-chasing and other repeatable but non-arithmetic orders
//! - **Worst Case:** Streams that never repeat (no mapping ever gains confidence)

/// Structural address allocator.
pub mod allocator;

/// Physical <-> structural address-mapping cache.
pub mod amc;

/// PC-indexed training unit.
pub mod training;

pub use self::allocator::StructuralAllocator;
pub use self::amc::{AddressMapping, AddressMappingCache, MappingGroup, MappingHandle};
pub use self::training::TrainingUnit;

use super::{FillPolicy, MemAccess, MshrProbe, PrefetchRequest, Prefetcher};
use crate::common::addr::{LineAddr, StructAddr};
use crate::common::constants::{CONFIDENCE_INITIAL, LINE_SHIFT};
use crate::config::{Config, IsbConfig};
use crate::stats::PrefetchStats;

/// What the correlation learner did with a pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Correlation {
    /// B already followed A structurally; its confidence was raised.
    Confirmed,
    /// B disagreed at confidence 1 and was moved to follow A.
    Reassigned,
    /// B disagreed while trusted; its confidence was lowered.
    Weakened,
    /// At least one side was unmapped; B now follows A.
    ///
    /// `region` is the structural region allocated for A, if A was unmapped.
    Established {
        /// Region allocated for A.
        region: Option<StructAddr>,
    },
    /// A and B could not be held at the same time (single-group PS cache).
    Conflict,
}

/// Outcome of a lookahead for one line.
///
/// Every variant other than `Found` is a valid reason to issue nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookahead {
    /// The line's PS group is not cached.
    Unmapped,
    /// The line's PS mapping has confidence 0.
    Untrusted,
    /// The structural group was evicted from the SP cache.
    Evicted(StructAddr),
    /// Confident structural neighbours, translated back to physical lines.
    ///
    /// May be empty when no neighbour in range is established.
    Found(Vec<LineAddr>),
}

/// Irregular stream buffer state for one core.
#[derive(Debug, Clone)]
pub struct IsbPrefetcher {
    training: TrainingUnit,
    ps: AddressMappingCache,
    sp: AddressMappingCache,
    allocator: StructuralAllocator,
    degree: usize,
    max_confidence: u8,
    line_shift: u32,
    fill: FillPolicy,
    stats: PrefetchStats,
}

impl IsbPrefetcher {
    /// Creates an engine from ISB parameters.
    ///
    /// # Arguments
    ///
    /// * `config` - Table capacities, chunk size, degree and confidence ceiling.
    /// * `line_shift` - Log2 of the cache line size.
    /// * `fill` - Fill-level decision applied to every candidate.
    pub fn new(config: &IsbConfig, line_shift: u32, fill: FillPolicy) -> Self {
        Self {
            training: TrainingUnit::new(config.training_entries),
            ps: AddressMappingCache::new(config.amc_entries),
            sp: AddressMappingCache::new(config.amc_entries),
            allocator: StructuralAllocator::new(config.chunk_size),
            degree: config.degree,
            max_confidence: config.max_confidence,
            line_shift,
            fill,
            stats: PrefetchStats::default(),
        }
    }

    /// Creates an engine from a full configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.isb, config.general.line_shift, config.fill.into())
    }

    /// Training unit state.
    pub fn training(&self) -> &TrainingUnit {
        &self.training
    }

    /// Physical -> structural cache.
    pub fn ps(&self) -> &AddressMappingCache {
        &self.ps
    }

    /// Structural -> physical cache.
    pub fn sp(&self) -> &AddressMappingCache {
        &self.sp
    }

    /// Structural allocator state.
    pub fn allocator(&self) -> &StructuralAllocator {
        &self.allocator
    }

    /// Number of structural neighbours scanned per access.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Learns that line `b` follows line `a`.
    ///
    /// Trusted mappings (confidence above 1) are never moved by a single
    /// disagreeing pair; they lose one point of confidence instead.
    pub fn correlate(&mut self, a: LineAddr, b: LineAddr) -> Correlation {
        self.stats.correlations += 1;

        let mut map_a = self.ps.get_or_create(a.val());
        let map_b = self.ps.get_or_create(b.val());
        if !self.ps.is_live(map_a) {
            // Inserting B's group swept A's group out; fetch it back.
            map_a = self.ps.get_or_create(a.val());
            if !self.ps.is_live(map_b) {
                return Correlation::Conflict;
            }
        }

        let ma = *self.ps.mapping(map_a);
        let mb = *self.ps.mapping(map_b);

        if ma.is_valid() && mb.is_valid() {
            let expected = ma.destination.wrapping_add(1);
            if mb.destination == expected {
                self.ps.mapping_mut(map_b).raise(self.max_confidence);
                self.stats.confidence_raised += 1;
                Correlation::Confirmed
            } else if mb.confidence == CONFIDENCE_INITIAL {
                self.ps.mapping_mut(map_b).destination = expected;
                self.sp.add_reverse(expected, b.val());
                self.stats.reassignments += 1;
                tracing::debug!(%b, structural = %StructAddr(expected), "reassigned mapping");
                Correlation::Reassigned
            } else {
                self.ps.mapping_mut(map_b).lower();
                self.stats.confidence_dropped += 1;
                Correlation::Weakened
            }
        } else {
            let mut region = None;
            if !ma.is_valid() {
                let base = self.allocator.allocate();
                self.ps.mapping_mut(map_a).establish(base.val());
                self.sp.add_reverse(base.val(), a.val());
                self.stats.regions_allocated += 1;
                tracing::debug!(%a, region = %base, "allocated structural region");
                region = Some(base);
            }
            // Re-read A: when A and B share a mapping the write above is visible here.
            let follow = self.ps.mapping(map_a).destination.wrapping_add(1);
            self.ps.mapping_mut(map_b).establish(follow);
            self.sp.add_reverse(follow, b.val());
            Correlation::Established { region }
        }
    }

    /// Looks up the structural neighbours of `line`.
    pub fn lookahead(&mut self, line: LineAddr) -> Lookahead {
        let Some(ps) = self.ps.lookup(line.val()) else {
            return Lookahead::Unmapped;
        };
        let mapping = *self.ps.mapping(ps);
        if !mapping.is_valid() {
            return Lookahead::Untrusted;
        }

        let structural = StructAddr(mapping.destination);
        let Some(sp) = self.sp.lookup(structural.val()) else {
            return Lookahead::Evicted(structural);
        };

        let targets = (1..=self.degree)
            .filter_map(|d| self.sp.neighbour(sp, d))
            .filter(AddressMapping::is_valid)
            .map(|m| LineAddr(m.destination))
            .collect();
        Lookahead::Found(targets)
    }

    /// Turns the lookahead for `line` into prefetch requests.
    fn generate(&mut self, trigger: u64, line: LineAddr, probe: &dyn MshrProbe) -> Vec<PrefetchRequest> {
        match self.lookahead(line) {
            Lookahead::Found(targets) => targets
                .into_iter()
                .map(|t| {
                    self.fill
                        .request(trigger, t.to_byte(self.line_shift), probe, &mut self.stats)
                })
                .collect(),
            Lookahead::Unmapped | Lookahead::Untrusted => {
                self.stats.ps_misses += 1;
                Vec::new()
            }
            Lookahead::Evicted(structural) => {
                self.stats.sp_misses += 1;
                tracing::trace!(%line, %structural, "structural group evicted");
                Vec::new()
            }
        }
    }
}

impl Default for IsbPrefetcher {
    fn default() -> Self {
        Self::new(&IsbConfig::default(), LINE_SHIFT, crate::config::FillConfig::default().into())
    }
}

impl Prefetcher for IsbPrefetcher {
    fn name(&self) -> &'static str {
        "isb"
    }

    /// Trains on the access, then prefetches from the current line's
    /// structural neighbours whether or not a pair was learned.
    fn operate(&mut self, access: MemAccess, probe: &dyn MshrProbe) -> Vec<PrefetchRequest> {
        self.stats.accesses += 1;
        if access.cache_hit {
            self.stats.cache_hits += 1;
        }

        let line = LineAddr::from_byte(access.addr, self.line_shift);
        if let Some((a, b)) = self.training.observe(access.ip, line) {
            self.stats.training_hits += 1;
            let _ = self.correlate(a, b);
        }

        self.generate(access.addr, line, probe)
    }

    fn reset(&mut self) {
        self.training.reset();
        self.ps.reset();
        self.sp.reset();
        self.allocator.reset();
        self.stats.clear();
    }

    fn stats(&self) -> &PrefetchStats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut PrefetchStats {
        &mut self.stats
    }
}
