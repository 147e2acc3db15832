//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two value
/// objects with the same attribute values are the same value. A monetary
/// line total is a value object; a quote is an entity.
///
/// To "modify" a value object, construct a new one. The trait requires
/// `Clone` (values are cheap to copy), `PartialEq` (compared by value), and
/// `Debug` (loggable, testable).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
