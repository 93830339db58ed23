//! Associative Table Tests.
//!
//! Verifies tag lookup, insertion, and the clock and round-robin victim
//! selection of `AssocTable`. Each policy is also exercised in isolation.

use isb_core::table::AssocTable;
use isb_core::table::policies::{ClockPolicy, ReplacementPolicy, RoundRobinPolicy};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

// ══════════════════════════════════════════════════════════
// 1. Clock policy
// ══════════════════════════════════════════════════════════

/// An empty table fills slots in order, then the hand wraps to slot 0.
#[test]
fn clock_fills_in_slot_order() {
    let mut table: AssocTable<u64, u32> = AssocTable::new(4);
    let slots: Vec<usize> = (10..14).map(|k| table.insert(k)).collect();
    assert_eq!(slots, vec![0, 1, 2, 3]);
    assert_eq!(table.len(), 4);
    assert_eq!(table.policy().hand(), 0);
}

/// A hit gives the entry a second chance; the next unreferenced entry goes.
#[test]
fn clock_hit_protects_entry() {
    let mut table: AssocTable<u64, u32> = AssocTable::new(3);
    for k in 0..3 {
        let _ = table.insert(k);
    }
    // All three referenced: the sweep clears every bit and evicts slot 0.
    assert_eq!(table.insert(100), 0);
    // Slots 1 and 2 are now unreferenced; touch key 1 to protect it.
    assert!(table.find(1).is_some());
    // The hand sits at 1: key 1 loses its bit, key 2 (slot 2) is evicted.
    assert_eq!(table.insert(200), 2);
    assert!(table.peek(1).is_some());
    assert!(table.peek(2).is_none());
    assert_eq!(table.policy().hand(), 0);
}

/// Inserted entries are referenced: they survive one sweep.
#[test]
fn clock_insert_sets_recency() {
    let mut clock = ClockPolicy::with_capacity(2);
    let slot = clock.victim();
    clock.touch(slot);
    assert!(clock.is_referenced(slot));
    assert_eq!(clock.victim(), 1);
}

/// `get_or_insert` reports whether the key was present.
#[test]
fn get_or_insert_hit_and_miss() {
    let mut table: AssocTable<u64, u32> = AssocTable::new(2);
    let (slot, hit) = table.get_or_insert(5);
    assert!(!hit);
    let (again, hit) = table.get_or_insert(5);
    assert!(hit);
    assert_eq!(slot, again);
}

/// `peek` does not count as a use.
#[test]
fn peek_leaves_recency_untouched() {
    let mut table: AssocTable<u64, u32> = AssocTable::new(2);
    let _ = table.insert(1);
    let _ = table.insert(2);
    // First eviction clears both bits and takes slot 0.
    assert_eq!(table.insert(3), 0);
    // Peeking key 2 must not protect it.
    assert!(table.peek(2).is_some());
    assert_eq!(table.insert(4), 1);
    assert!(table.peek(2).is_none());
}

// ══════════════════════════════════════════════════════════
// 2. Round-robin policy
// ══════════════════════════════════════════════════════════

/// Round-robin cycles through slots regardless of hits.
#[test]
fn round_robin_ignores_hits() {
    let mut table: AssocTable<u64, (), RoundRobinPolicy> = AssocTable::new(3);
    for k in 0..3 {
        let _ = table.insert(k);
    }
    assert!(table.find(0).is_some());
    assert!(table.find(0).is_some());
    assert_eq!(table.insert(10), 0);
    assert_eq!(table.insert(11), 1);
    assert!(table.peek(0).is_none());
}

/// Reset restarts the round-robin pointer.
#[test]
fn round_robin_reset() {
    let mut rr = RoundRobinPolicy::with_capacity(4);
    assert_eq!(rr.victim(), 0);
    assert_eq!(rr.victim(), 1);
    rr.reset();
    assert_eq!(rr.victim(), 0);
}

// ══════════════════════════════════════════════════════════
// 3. Liveness
// ══════════════════════════════════════════════════════════

/// A zero-capacity request still yields a usable single-slot table.
#[test]
fn zero_capacity_is_raised() {
    let mut table: AssocTable<u64, u32> = AssocTable::new(0);
    assert_eq!(table.capacity(), 1);
    assert_eq!(table.insert(1), 0);
    assert_eq!(table.insert(2), 0);
}

proptest! {
    /// Inserting more distinct tags than slots leaves the table exactly full,
    /// and every victim is the first slot from the hand whose recency bit
    /// was clear (or the hand itself once a full sweep cleared every bit).
    #[test]
    fn clock_victim_is_first_unreferenced(
        capacity in 1usize..16,
        ops in prop::collection::vec((any::<bool>(), 0u64..48), 1..200),
    ) {
        let mut table: AssocTable<u64, u32> = AssocTable::new(capacity);
        for (lookup, key) in ops {
            if lookup || table.peek(key).is_some() {
                let _ = table.find(key);
                continue;
            }
            let hand = table.policy().hand();
            let bits: Vec<bool> = (0..capacity).map(|s| table.policy().is_referenced(s)).collect();
            let expected = (0..capacity)
                .map(|i| (hand + i) % capacity)
                .find(|&s| !bits[s])
                .unwrap_or(hand);
            let slot = table.insert(key);
            prop_assert_eq!(slot, expected);
            prop_assert!(table.len() <= capacity);
        }
    }

    /// N > C distinct inserts leave exactly C live entries.
    #[test]
    fn clock_table_stays_full(capacity in 1usize..32, extra in 1usize..64) {
        let mut table: AssocTable<u64, ()> = AssocTable::new(capacity);
        for key in 0..(capacity + extra) as u64 {
            let _ = table.insert(key);
        }
        prop_assert_eq!(table.len(), capacity);
        let live: Vec<u64> = table.iter().map(|(k, _)| k).collect();
        prop_assert_eq!(live.len(), capacity);
    }
}
