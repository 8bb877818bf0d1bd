//! Shared diagnostic shapes for validator failures.

use std::fmt;

use crate::diag::{Diagnostic, Severity};
use crate::path::Path;

/// Summary used by [`invalid_attribute_value`].
pub const INVALID_ATTRIBUTE_VALUE: &str = "Invalid Attribute Value";

/// Error for a configured value that breaks the rule `description` states.
///
/// # Examples
///
/// ```
/// use attrvalidator::Path;
/// use attrvalidator::validator::validatordiag::invalid_attribute_value;
///
/// let diag = invalid_attribute_value(
///     &Path::root("tags").at_map_key("b"),
///     "set must contain at least 2 elements",
///     1,
/// );
/// assert_eq!(
///     diag.detail(),
///     r#"Attribute tags["b"] set must contain at least 2 elements, got: 1"#
/// );
/// ```
pub fn invalid_attribute_value(
    path: &Path,
    description: &str,
    value: impl fmt::Display,
) -> Diagnostic {
    Diagnostic::with_path(
        Severity::Error,
        path.clone(),
        INVALID_ATTRIBUTE_VALUE,
        format!("Attribute {path} {description}, got: {value}"),
    )
}
