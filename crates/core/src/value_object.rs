//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Predictions and calibrations are value objects: they carry no identity and
/// are recomputed from inputs rather than updated in place. Two predictions with
/// the same dates, confidence and status are the same prediction.
///
/// The trait requires:
/// - **Clone**: values are cheap to copy around
/// - **PartialEq**: compared by their attribute values
/// - **Debug**: useful in logs and test failures
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
