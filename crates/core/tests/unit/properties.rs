//! Engine Invariant Properties.
//!
//! Random access streams and correlation pairs drive the ISB engine; each
//! property checks an invariant that must hold after every step.

use isb_core::common::{CONFIDENCE_MAX, LineAddr, StructAddr};
use isb_core::config::IsbConfig;
use isb_core::prefetch::isb::{Correlation, IsbPrefetcher};
use isb_core::prefetch::{FillPolicy, MemAccess, Prefetcher};
use proptest::prelude::*;

fn small_engine() -> IsbPrefetcher {
    let config = IsbConfig {
        training_entries: 8,
        amc_entries: 8,
        ..IsbConfig::default()
    };
    IsbPrefetcher::new(&config, 6, FillPolicy::new(8))
}

fn max_confidence(isb: &IsbPrefetcher) -> u8 {
    isb.ps()
        .groups()
        .chain(isb.sp().groups())
        .flat_map(|(_, g)| g.mappings.iter().map(|m| m.confidence))
        .max()
        .unwrap_or(0)
}

proptest! {
    /// Confidence never exceeds the ceiling, in either cache.
    #[test]
    fn confidence_is_bounded(
        accesses in prop::collection::vec((0u64..4, 0u64..96), 1..300),
    ) {
        let mut isb = small_engine();
        let probe = || 0usize;
        for (pc, l) in accesses {
            let _ = isb.operate(MemAccess::new(l << 6, pc, false), &probe);
            prop_assert!(max_confidence(&isb) <= CONFIDENCE_MAX);
        }
    }

    /// Every access yields at most `degree` requests.
    #[test]
    fn requests_bounded_by_degree(
        degree in 1usize..8,
        accesses in prop::collection::vec((0u64..4, 0u64..64), 1..300),
    ) {
        let config = IsbConfig { degree, ..IsbConfig::default() };
        let mut isb = IsbPrefetcher::new(&config, 6, FillPolicy::new(8));
        let probe = || 0usize;
        for (pc, l) in accesses {
            let out = isb.operate(MemAccess::new(l << 6, pc, false), &probe);
            prop_assert!(out.len() <= degree);
        }
    }

    /// Fresh regions are handed out in strictly increasing chunk steps.
    #[test]
    fn regions_increase_by_chunk(
        pairs in prop::collection::vec((0u64..2048, 0u64..2048), 1..100),
    ) {
        let mut isb = small_engine();
        let mut last: Option<StructAddr> = None;
        for (a, b) in pairs {
            if let Correlation::Established { region: Some(base) } = isb.correlate(LineAddr(a), LineAddr(b)) {
                let expected = last.map_or(0, |prev| prev.val() + 256);
                prop_assert_eq!(base.val(), expected);
                last = Some(base);
            }
        }
    }

    /// A mapping that disagrees with its predecessor is only moved at
    /// confidence 1.
    #[test]
    fn trusted_mappings_are_not_moved(
        pairs in prop::collection::vec((0u64..512, 0u64..512), 1..200),
    ) {
        // 512 lines fit in 32 groups, so nothing is ever evicted.
        let mut isb = IsbPrefetcher::default();
        for (a, b) in pairs {
            let before_a = isb.ps().peek(a).filter(|m| m.is_valid());
            let before_b = isb.ps().peek(b).filter(|m| m.is_valid());
            let outcome = isb.correlate(LineAddr(a), LineAddr(b));
            if let (Some(_), Some(mb)) = (before_a, before_b) {
                if mb.confidence >= 2 {
                    prop_assert_ne!(outcome, Correlation::Reassigned);
                    let after = isb.ps().peek(b).unwrap();
                    prop_assert_eq!(after.destination, mb.destination);
                }
            }
        }
    }
}
