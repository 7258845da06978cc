//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Every record kept in a [`KeyedStore`](crate::store::KeyedStore) is an
/// entity; its identifier's string form is the store key.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Key under which the entity is stored.
    fn store_key(&self) -> String {
        self.id().to_string()
    }
}
