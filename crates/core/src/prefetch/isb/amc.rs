//! Address Mapping Cache.
//!
//! Maps groups of contiguous source addresses to independent destination
//! addresses, each with its own confidence counter. The engine keeps two
//! instances that mirror each other:
//! 1. **PS:** Physical line -> structural address.
//! 2. **SP:** Structural address -> physical line.
//!
//! A group covers `MAPPINGS_PER_GROUP` sources: the group tag is
//! `source / MAPPINGS_PER_GROUP` and the slot is `source % MAPPINGS_PER_GROUP`.
//! Groups are replaced with the clock policy; a freshly inserted group starts
//! with every mapping zeroed.

use crate::common::addr::group_of;
use crate::common::constants::{CONFIDENCE_INITIAL, CONFIDENCE_INVALID, MAPPINGS_PER_GROUP};
use crate::table::AssocTable;

/// One source -> destination mapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AddressMapping {
    /// Destination address (structural in PS, physical line in SP).
    pub destination: u64,
    /// Trust in this mapping; 0 means not established.
    pub confidence: u8,
}

impl AddressMapping {
    /// Returns `true` if the mapping has been established.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.confidence > CONFIDENCE_INVALID
    }

    /// Raises confidence by one, saturating at `max`.
    #[inline]
    pub fn raise(&mut self, max: u8) {
        if self.confidence < max {
            self.confidence += 1;
        }
    }

    /// Lowers confidence by one, never below zero.
    #[inline]
    pub fn lower(&mut self) {
        self.confidence = self.confidence.saturating_sub(1);
    }

    /// Overwrites the mapping with `destination` at initial confidence.
    #[inline]
    pub fn establish(&mut self, destination: u64) {
        self.destination = destination;
        self.confidence = CONFIDENCE_INITIAL;
    }
}

/// Mappings for `MAPPINGS_PER_GROUP` contiguous sources.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MappingGroup {
    /// Mappings indexed by `source % MAPPINGS_PER_GROUP`.
    pub mappings: [AddressMapping; MAPPINGS_PER_GROUP],
}

/// Handle to one mapping inside a cached group.
///
/// A handle stays usable until its group is evicted; `is_live` tells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MappingHandle {
    entry: usize,
    slot: usize,
    tag: u64,
}

impl MappingHandle {
    /// Position of the mapping within its group.
    pub const fn slot(&self) -> usize {
        self.slot
    }

    /// Tag of the group the mapping belongs to.
    pub const fn group(&self) -> u64 {
        self.tag
    }
}

/// Clock-replaced cache of mapping groups.
#[derive(Debug, Clone)]
pub struct AddressMappingCache {
    table: AssocTable<u64, MappingGroup>,
}

impl AddressMappingCache {
    /// Creates an empty cache holding up to `entries` groups.
    pub fn new(entries: usize) -> Self {
        Self {
            table: AssocTable::new(entries),
        }
    }

    /// Finds the mapping for `source` without creating it.
    ///
    /// A hit marks the group recently used.
    pub fn lookup(&mut self, source: u64) -> Option<MappingHandle> {
        let (tag, slot) = group_of(source);
        self.table
            .find(tag)
            .map(|entry| MappingHandle { entry, slot, tag })
    }

    /// Returns the mapping for `source`, inserting an empty group on a miss.
    ///
    /// Never fails: a miss always evicts some group.
    pub fn get_or_create(&mut self, source: u64) -> MappingHandle {
        let (tag, slot) = group_of(source);
        let (entry, _) = self.table.get_or_insert(tag);
        MappingHandle { entry, slot, tag }
    }

    /// Overwrites the mapping for `source` with `destination` at confidence 1.
    pub fn add_reverse(&mut self, source: u64, destination: u64) {
        let handle = self.get_or_create(source);
        self.mapping_mut(handle).establish(destination);
    }

    /// Returns `true` if the handle's group is still cached.
    pub fn is_live(&self, handle: MappingHandle) -> bool {
        self.table.holds(handle.entry, handle.tag)
    }

    /// The mapping a handle refers to.
    pub fn mapping(&self, handle: MappingHandle) -> &AddressMapping {
        &self.table.get(handle.entry).mappings[handle.slot]
    }

    /// The mapping a handle refers to, mutably.
    pub fn mapping_mut(&mut self, handle: MappingHandle) -> &mut AddressMapping {
        &mut self.table.get_mut(handle.entry).mappings[handle.slot]
    }

    /// The mapping `offset` slots after `handle` in the same group.
    ///
    /// Returns `None` when the offset runs past the end of the group; groups
    /// are never chained or wrapped.
    pub fn neighbour(&self, handle: MappingHandle, offset: usize) -> Option<AddressMapping> {
        let slot = handle.slot.checked_add(offset)?;
        self.table.get(handle.entry).mappings.get(slot).copied()
    }

    /// Reads the mapping for `source` without touching replacement state.
    pub fn peek(&self, source: u64) -> Option<AddressMapping> {
        let (tag, slot) = group_of(source);
        self.table.peek(tag).map(|group| group.mappings[slot])
    }

    /// Iterates over cached `(group tag, group)` pairs.
    pub fn groups(&self) -> impl Iterator<Item = (u64, &MappingGroup)> + '_ {
        self.table.iter()
    }

    /// Number of cached groups.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if no group is cached.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Drops every group.
    pub fn reset(&mut self) {
        self.table.reset();
    }
}
