//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Animals are entities: two snapshots of the same animal with different
/// record histories still refer to the same individual.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
