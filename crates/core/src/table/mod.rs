//! Fully-Associative Prediction Table.
//!
//! This module implements the tag-indexed table that backs every piece of
//! predictor state (training unit, both address-mapping caches and the stride
//! table). It provides:
//! 1. **Exact-match lookup:** Linear tag scan; a hit notifies the replacement policy.
//! 2. **Insertion:** The policy chooses a victim slot which is overwritten with a default value.
//! 3. **Slot handles:** Callers hold a slot index and mutate through it instead of borrowing.
//!
//! Tags are unique: `insert` is only reached after a failed lookup, so at most
//! one live slot carries any given tag.

/// Replacement policy implementations (Clock, Round-Robin).
pub mod policies;

use self::policies::{ClockPolicy, ReplacementPolicy};

/// A single table slot.
#[derive(Debug, Clone)]
struct Slot<K, V> {
    tag: Option<K>,
    value: V,
}

/// Fixed-capacity, fully-associative table with pluggable replacement.
#[derive(Debug, Clone)]
pub struct AssocTable<K, V, P = ClockPolicy> {
    slots: Vec<Slot<K, V>>,
    policy: P,
}

impl<K, V, P> AssocTable<K, V, P>
where
    K: Copy + Eq,
    V: Default,
    P: ReplacementPolicy,
{
    /// Creates an empty table.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of slots; a zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || Slot {
            tag: None,
            value: V::default(),
        });
        Self {
            slots,
            policy: P::with_capacity(capacity),
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots currently holding a tag.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.tag.is_some()).count()
    }

    /// Returns `true` if no slot holds a tag.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.tag.is_none())
    }

    /// Looks up `key` and marks the slot recently used on a hit.
    pub fn find(&mut self, key: K) -> Option<usize> {
        let slot = self.position(key)?;
        self.policy.touch(slot);
        Some(slot)
    }

    /// Looks up `key` without touching replacement state.
    pub fn peek(&self, key: K) -> Option<&V> {
        self.position(key).map(|slot| &self.slots[slot].value)
    }

    /// Installs `key` in the slot chosen by the replacement policy.
    ///
    /// The previous occupant is discarded and the value reset to its default.
    /// The caller must have checked that `key` is not already present.
    pub fn insert(&mut self, key: K) -> usize {
        let slot = self.policy.victim();
        self.slots[slot] = Slot {
            tag: Some(key),
            value: V::default(),
        };
        self.policy.touch(slot);
        slot
    }

    /// Returns the slot holding `key`, inserting it first on a miss.
    ///
    /// The boolean is `true` when the key was already present.
    pub fn get_or_insert(&mut self, key: K) -> (usize, bool) {
        match self.find(key) {
            Some(slot) => (slot, true),
            None => (self.insert(key), false),
        }
    }

    /// Returns the value stored in `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= capacity()`. Slot handles come from `find`/`insert`
    /// and are always in range.
    pub fn get(&self, slot: usize) -> &V {
        &self.slots[slot].value
    }

    /// Returns the value stored in `slot` mutably.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= capacity()`.
    pub fn get_mut(&mut self, slot: usize) -> &mut V {
        &mut self.slots[slot].value
    }

    /// Returns the tag held by `slot`, if any.
    pub fn key_at(&self, slot: usize) -> Option<K> {
        self.slots.get(slot).and_then(|s| s.tag)
    }

    /// Returns `true` if `slot` still holds `key` (it has not been evicted).
    pub fn holds(&self, slot: usize, key: K) -> bool {
        self.key_at(slot) == Some(key)
    }

    /// Iterates over live `(tag, value)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> + '_ {
        self.slots
            .iter()
            .filter_map(|s| s.tag.map(|tag| (tag, &s.value)))
    }

    /// Replacement policy state, for inspection.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Empties every slot and resets the replacement policy.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.tag = None;
            slot.value = V::default();
        }
        self.policy.reset();
    }

    fn position(&self, key: K) -> Option<usize> {
        self.slots.iter().position(|s| s.tag == Some(key))
    }
}
