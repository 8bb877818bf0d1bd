//! Error types for value construction and conversion.

use std::fmt;

use super::AttrType;

/// A value could not be viewed as another kind of value.
///
/// Returned by the typed conversion seams ([`AttrType::as_set_typable`] and
/// [`Value::as_set_valuable`](super::Value::as_set_valuable)) instead of a
/// runtime type assertion.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// The type does not describe a set, and no custom set conversion exists.
    NotSetTypable {
        /// The type that was inspected.
        found: AttrType,
    },
    /// The value is not a set, and no custom set conversion exists.
    NotSetValuable {
        /// Type of the value that was inspected.
        found: AttrType,
    },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::NotSetTypable { found } => {
                write!(f, "type {found} cannot be converted to a set type")
            }
            ConversionError::NotSetValuable { found } => {
                write!(f, "value of type {found} cannot be converted to a set value")
            }
        }
    }
}

impl std::error::Error for ConversionError {}

/// A collection value could not be constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueError {
    /// An element does not have the declared element type.
    ElementType {
        /// Position (list/set) or key (map) of the offending element.
        at: String,
        /// Declared element type.
        expected: AttrType,
        /// Actual type of the element.
        found: AttrType,
    },
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueError::ElementType {
                at,
                expected,
                found,
            } => write!(
                f,
                "element {at} has type {found}, expected element type {expected}"
            ),
        }
    }
}

impl std::error::Error for ValueError {}
