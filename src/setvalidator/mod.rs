//! Validators for set attributes
//!
//! Size bounds, combinators over lists of set validators, and an adapter for
//! closures. The size validators skip null and unknown sets.
//!
//! # Example
//!
//! ```rust
//! use attrvalidator::prelude::*;
//! use attrvalidator::setvalidator;
//!
//! let validators: SetValidators = vec![
//!     Box::new(setvalidator::size_at_least(1)),
//!     Box::new(setvalidator::size_at_most(10)),
//! ];
//! assert_eq!(validators.len(), 2);
//! ```

mod combinators;
mod from_fn;
mod size;

pub use combinators::{all, any, All, Any};
pub use from_fn::{from_fn, FromFn};
pub use size::{size_at_least, size_at_most, size_between, SizeAtLeast, SizeAtMost, SizeBetween};
