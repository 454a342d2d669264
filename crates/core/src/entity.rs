//! Entity trait: things with a stable identity.

/// A domain object distinguished by its identifier rather than its attributes.
///
/// Two products with equal names and prices are still different products if
/// their ids differ.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
