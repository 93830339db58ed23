//! Prefetcher statistics collection and reporting.
//!
//! This module tracks the behaviour of a single engine instance. It provides:
//! 1. **Training:** Accesses observed, training-table hits and correlated pairs.
//! 2. **Mapping:** Region allocations, confidence movement, reassignments and lookup misses.
//! 3. **Prefetch:** Requests issued per fill level and fills reported by the harness.
//!
//! Counters have no influence on prediction state.

/// Section names for selective stats output.
///
/// Valid section identifiers: `"training"`, `"mapping"`, `"prefetch"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["training", "mapping", "prefetch"];

/// Per-engine counters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrefetchStats {
    /// Memory accesses observed.
    pub accesses: u64,
    /// Accesses that hit in the cache the engine is attached to.
    pub cache_hits: u64,
    /// Accesses whose PC was already tracked by the training table.
    pub training_hits: u64,
    /// Correlated (A, B) pairs handed to the learner.
    pub correlations: u64,

    /// Fresh structural regions allocated.
    pub regions_allocated: u64,
    /// Confirmations that raised a mapping's confidence.
    pub confidence_raised: u64,
    /// Disagreements that lowered a trusted mapping's confidence.
    pub confidence_dropped: u64,
    /// Low-confidence mappings moved to a new structural position.
    pub reassignments: u64,
    /// Accesses with no usable physical-to-structural mapping.
    pub ps_misses: u64,
    /// Accesses whose structural group had been evicted from the SP cache.
    pub sp_misses: u64,

    /// Prefetches requested into the near (L2) level.
    pub prefetches_near: u64,
    /// Prefetches requested into the far (LLC) level.
    pub prefetches_far: u64,
    /// Cache fills reported by the harness.
    pub fills: u64,
    /// Reported fills that were prefetches.
    pub prefetch_fills: u64,
}

impl PrefetchStats {
    /// Total prefetches requested across both fill levels.
    pub fn prefetches(&self) -> u64 {
        self.prefetches_near + self.prefetches_far
    }

    /// Clears every counter.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of `"training"`, `"mapping"`
    /// or `"prefetch"`. Pass an empty slice to print all sections.
    ///
    /// # Arguments
    ///
    /// * `name` - Engine name shown in the banner.
    /// * `sections` - Slice of section names to print, or empty for all.
    pub fn print_sections(&self, name: &str, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let pct = |num: u64, den: u64| {
            if den == 0 {
                0.0
            } else {
                (num as f64 / den as f64) * 100.0
            }
        };

        println!("\n==========================================================");
        println!("PREFETCHER STATISTICS ({name})");
        println!("==========================================================");
        if want("training") {
            println!("TRAINING");
            println!("  pf.accesses            {}", self.accesses);
            println!(
                "  pf.cache_hits          {} ({:.2}%)",
                self.cache_hits,
                pct(self.cache_hits, self.accesses)
            );
            println!(
                "  pf.training_hits       {} ({:.2}%)",
                self.training_hits,
                pct(self.training_hits, self.accesses)
            );
            println!("  pf.correlations        {}", self.correlations);
            println!("----------------------------------------------------------");
        }
        if want("mapping") {
            println!("MAPPING");
            println!("  map.regions            {}", self.regions_allocated);
            println!("  map.conf_raised        {}", self.confidence_raised);
            println!("  map.conf_dropped       {}", self.confidence_dropped);
            println!("  map.reassigned         {}", self.reassignments);
            println!("  map.ps_misses          {}", self.ps_misses);
            println!("  map.sp_misses          {}", self.sp_misses);
            println!("----------------------------------------------------------");
        }
        if want("prefetch") {
            let total = self.prefetches();
            println!("PREFETCH");
            println!("  pf.issued              {total}");
            println!(
                "  pf.fill_near           {} ({:.2}%)",
                self.prefetches_near,
                pct(self.prefetches_near, total)
            );
            println!(
                "  pf.fill_far            {} ({:.2}%)",
                self.prefetches_far,
                pct(self.prefetches_far, total)
            );
            println!(
                "  pf.fills               {} | prefetched: {}",
                self.fills, self.prefetch_fills
            );
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(name, &[])`.
    pub fn print(&self, name: &str) {
        self.print_sections(name, &[]);
    }
}
