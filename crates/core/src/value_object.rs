//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. To
/// "modify" one, build a new one. Constructors validate, so a value object that
/// exists is always valid (e.g. a `Percentage` is always within [0, 100]).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
