//! Prefetch engine implementations.
//!
//! This module contains the interface shared by the engines, the request
//! types handed back to the harness, and the fill-level decision.

/// Irregular stream buffer (structural address remapping).
pub mod isb;

/// Per-PC stride predictor with a four-state confidence automaton.
pub mod stride_fsm;

pub use self::isb::IsbPrefetcher;
pub use self::stride_fsm::StrideFsmPrefetcher;

use crate::config::FillConfig;
use crate::stats::PrefetchStats;

/// Cache level a prefetched line is requested into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FillLevel {
    /// Nearer, smaller level (L2).
    Near,
    /// Farther, larger shared level (LLC).
    Far,
}

/// A prefetch request handed back to the harness.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrefetchRequest {
    /// Byte address of the access that triggered the request.
    pub trigger: u64,
    /// Byte address to prefetch.
    pub target: u64,
    /// Level the line should be filled into.
    pub fill: FillLevel,
}

/// One observed memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemAccess {
    /// Byte address accessed.
    pub addr: u64,
    /// Instruction pointer of the load or store.
    pub ip: u64,
    /// Whether the access hit in the cache the engine is attached to.
    pub cache_hit: bool,
}

impl MemAccess {
    /// Creates an access record.
    pub const fn new(addr: u64, ip: u64, cache_hit: bool) -> Self {
        Self {
            addr,
            ip,
            cache_hit,
        }
    }
}

/// A cache fill event reported by the harness.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheFill {
    /// Byte address of the filled line.
    pub addr: u64,
    /// Set the line was placed in.
    pub set: usize,
    /// Way the line was placed in.
    pub way: usize,
    /// Whether the fill was caused by a prefetch.
    pub prefetch: bool,
    /// Byte address of the line that was evicted to make room.
    pub evicted_addr: u64,
}

/// Live MSHR occupancy of the cache the engine prefetches for.
///
/// Implemented for any `Fn() -> usize`, so a harness can pass a closure.
pub trait MshrProbe {
    /// Number of MSHRs currently in use.
    fn mshr_occupancy(&self) -> usize;
}

impl<F> MshrProbe for F
where
    F: Fn() -> usize,
{
    fn mshr_occupancy(&self) -> usize {
        self()
    }
}

/// Static two-level backpressure policy.
///
/// A candidate is never dropped for resource reasons, only redirected to the
/// far level while MSHRs are scarce.
#[derive(Clone, Copy, Debug)]
pub struct FillPolicy {
    threshold: usize,
}

impl FillPolicy {
    /// Creates a policy that redirects when occupancy exceeds `threshold`.
    pub const fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    /// Chooses the fill level from a fresh occupancy reading.
    pub fn select(&self, probe: &dyn MshrProbe) -> FillLevel {
        if probe.mshr_occupancy() > self.threshold {
            FillLevel::Far
        } else {
            FillLevel::Near
        }
    }

    /// Builds a request for `target`, querying the probe once.
    pub fn request(
        &self,
        trigger: u64,
        target: u64,
        probe: &dyn MshrProbe,
        stats: &mut PrefetchStats,
    ) -> PrefetchRequest {
        let fill = self.select(probe);
        match fill {
            FillLevel::Near => stats.prefetches_near += 1,
            FillLevel::Far => stats.prefetches_far += 1,
        }
        tracing::trace!(trigger, target, ?fill, "prefetch");
        PrefetchRequest {
            trigger,
            target,
            fill,
        }
    }
}

impl From<FillConfig> for FillPolicy {
    fn from(config: FillConfig) -> Self {
        Self::new(config.mshr_threshold)
    }
}

/// Trait for prefetch engines.
///
/// One instance models the prefetcher of one simulated core. The harness
/// calls `operate` once per observed access, in access order.
pub trait Prefetcher: Send {
    /// Short engine name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Observes a memory access and generates prefetch requests.
    ///
    /// # Arguments
    ///
    /// * `access` - The access being observed.
    /// * `probe` - Source of the current MSHR occupancy.
    ///
    /// # Returns
    ///
    /// Zero or more requests. Empty when nothing is predicted.
    fn operate(&mut self, access: MemAccess, probe: &dyn MshrProbe) -> Vec<PrefetchRequest>;

    /// Notifies the engine of a cache fill.
    ///
    /// Prediction state does not consume fills; they are counted only.
    fn cache_fill(&mut self, fill: &CacheFill) {
        let stats = self.stats_mut();
        stats.fills += 1;
        if fill.prefetch {
            stats.prefetch_fills += 1;
        }
    }

    /// Clears all prediction state, as at initialization.
    fn reset(&mut self);

    /// Counters collected since construction or the last clear.
    fn stats(&self) -> &PrefetchStats;

    /// Mutable access to the counters.
    fn stats_mut(&mut self) -> &mut PrefetchStats;
}

/// Engine that never prefetches.
#[derive(Debug, Default)]
pub struct NullPrefetcher {
    stats: PrefetchStats,
}

impl Prefetcher for NullPrefetcher {
    fn name(&self) -> &'static str {
        "none"
    }

    fn operate(&mut self, access: MemAccess, _probe: &dyn MshrProbe) -> Vec<PrefetchRequest> {
        self.stats.accesses += 1;
        if access.cache_hit {
            self.stats.cache_hits += 1;
        }
        Vec::new()
    }

    fn reset(&mut self) {
        self.stats.clear();
    }

    fn stats(&self) -> &PrefetchStats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut PrefetchStats {
        &mut self.stats
    }
}
