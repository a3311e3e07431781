//! Entity trait: identity that survives catalog edits.

/// Entity marker + minimal interface.
///
/// Products and variations are entities: two reads of the same variation with
/// different stock levels still describe the same thing.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
