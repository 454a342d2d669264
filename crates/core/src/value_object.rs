//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**; two instances with the same attribute
/// values are interchangeable. A product category is one: it is defined
/// entirely by its (normalized) name and optional description.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
