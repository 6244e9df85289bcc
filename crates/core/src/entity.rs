//! Entity trait: identity assigned by the store, continuity across updates.

/// Entity marker + minimal interface.
///
/// Identity is optional because records exist in memory before the store
/// assigns them an id. Once assigned, it never changes.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier, if the entity has been persisted.
    fn id(&self) -> Option<Self::Id>;

    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}
