//! Statistics Tests.

use isb_core::stats::{PrefetchStats, STATS_SECTIONS};
use pretty_assertions::assert_eq;

use crate::common::harness::TestContext;
use crate::common::line;

#[test]
fn prefetches_sum_both_levels() {
    let stats = PrefetchStats {
        prefetches_near: 5,
        prefetches_far: 2,
        ..PrefetchStats::default()
    };
    assert_eq!(stats.prefetches(), 7);
}

#[test]
fn clear_zeroes_every_counter() {
    let mut stats = PrefetchStats {
        accesses: 10,
        correlations: 3,
        sp_misses: 1,
        prefetch_fills: 4,
        ..PrefetchStats::default()
    };
    stats.clear();
    assert_eq!(stats, PrefetchStats::default());
}

#[test]
fn section_names() {
    assert_eq!(STATS_SECTIONS, &["training", "mapping", "prefetch"]);
}

/// Printing with or without a filter, including empty counters, is total.
#[test]
fn print_handles_zero_denominators() {
    let stats = PrefetchStats::default();
    stats.print("isb");
    stats.print_sections("isb", &["mapping".to_string()]);
}

#[test]
fn miss_counters_follow_lookahead() {
    let mut ctx = TestContext::default();
    // Never seen: PS miss.
    let _ = ctx.access(1, line(500));
    let stats = ctx.driver.heartbeat_stats(0).unwrap();
    assert_eq!(stats.ps_misses, 1);
    assert_eq!(stats.sp_misses, 0);
    assert_eq!(stats.cache_hits, 0);
}

#[test]
fn cache_hits_are_counted() {
    let mut ctx = TestContext::default();
    let probe = || 0usize;
    let _ = ctx.driver.operate(0, line(1), 1, true, &probe).unwrap();
    let _ = ctx.driver.operate(0, line(2), 1, false, &probe).unwrap();
    let stats = ctx.driver.heartbeat_stats(0).unwrap();
    assert_eq!(stats.accesses, 2);
    assert_eq!(stats.cache_hits, 1);
    assert_eq!(stats.training_hits, 1);
}
