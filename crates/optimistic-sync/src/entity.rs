//! Entity Traits
//!
//! Contracts for records that live in a view-owned collection.

use std::fmt::Debug;
use std::hash::Hash;

/// Anything with a stable identifier unique within its collection
pub trait Entity: Clone {
    /// Opaque identifier type
    type Id: Clone + Eq + Hash + Debug;

    /// Returns the entity's identifier
    fn id(&self) -> Self::Id;
}

/// An entity that participates in a reorderable collection.
///
/// `sequence` is 1-based. Within one fetched snapshot the values form a
/// contiguous permutation of `1..=N`.
pub trait Sequenced: Entity {
    fn sequence(&self) -> u32;

    fn set_sequence(&mut self, sequence: u32);
}
