//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values (for
/// example a variation's attribute set). Entities, by contrast, are compared by
/// identity; see [`crate::Entity`].
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
