//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. Once constructed
/// (and validated) they never change; a different value is a new object.
///
/// In the ledger, a `Movement` is a value object while an `Account` is an
/// entity: two movements with identical fields are indistinguishable, two
/// accounts are distinct as long as their identifiers differ.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
