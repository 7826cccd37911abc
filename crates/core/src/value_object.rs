//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// A value object has no identity of its own; it is defined entirely by its
/// attribute values (`CountryCode`, a weight, a VAT tier). Two value objects
/// with equal values are interchangeable. Implementors should be immutable:
/// "modification" means constructing a new value.
///
/// Contrast with [`crate::Entity`], which is tracked by id across changes.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
