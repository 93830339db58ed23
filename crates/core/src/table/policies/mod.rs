//! Table Replacement Policies.
//!
//! Implements the victim-selection algorithms used by the fully-associative
//! prediction tables.
//!
//! # Policies
//!
//! - `Clock`: Second-chance replacement with one recency bit per slot.
//! - `RoundRobin`: Circular replacement that ignores hits.

/// Clock (second-chance) replacement policy.
pub mod clock;

/// Round-robin replacement policy.
pub mod round_robin;

pub use clock::ClockPolicy;
pub use round_robin::RoundRobinPolicy;

/// Trait for table replacement policies.
///
/// Defines the interface for updating usage state and selecting victim slots
/// in a single fully-associative set.
pub trait ReplacementPolicy: Send {
    /// Creates a policy for a table of `capacity` slots.
    fn with_capacity(capacity: usize) -> Self
    where
        Self: Sized;

    /// Updates the policy state when a slot is hit or freshly filled.
    ///
    /// # Arguments
    ///
    /// * `slot` - The slot that was accessed.
    fn touch(&mut self, slot: usize);

    /// Selects the slot to overwrite next.
    ///
    /// The returned slot is always `< capacity`.
    fn victim(&mut self) -> usize;

    /// Returns the policy to its freshly constructed state.
    fn reset(&mut self);
}
