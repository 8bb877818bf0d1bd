//! Semigroup trait for accumulating diagnostics
//!
//! A Semigroup is a type with an associative binary operation. Validators use it
//! to fold the diagnostics of many sub-validators into one collection without
//! caring about where each piece came from.
//!
//! # Laws
//!
//! ```text
//! a.combine(b).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! # Examples
//!
//! ```
//! use attrvalidator::{Diagnostics, Path, Semigroup};
//!
//! let mut first = Diagnostics::new();
//! first.add_attribute_error(Path::root("tags"), "Bad", "first problem");
//!
//! let mut second = Diagnostics::new();
//! second.add_attribute_warning(Path::root("tags"), "Odd", "second problem");
//!
//! let all = first.combine(second);
//! assert_eq!(all.len(), 2);
//! assert!(all.has_error());
//! ```

/// A type that supports an associative binary operation
///
/// `combine` takes both sides by value. Clone first if the originals are
/// still needed.
pub trait Semigroup: Sized {
    /// Combine this value with another value associatively
    fn combine(self, other: Self) -> Self;
}

impl<T> Semigroup for Vec<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl Semigroup for String {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}
