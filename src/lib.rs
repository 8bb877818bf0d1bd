//! # attrvalidator
//!
//! Attribute validators for configuration schemas.
//!
//! The centrepiece is [`mapvalidator::value_sets_are`]: given a map whose
//! values are sets, it checks every set against an ordered list of
//! [`SetValidator`]s and reports each failure at the exact map entry that
//! caused it.
//!
//! ## Model
//!
//! - [`types`]: attribute types and values, each possibly null or unknown
//! - [`path`]: where a value lives ([`Path`]) and path patterns ([`PathExpression`])
//! - [`diag`]: severity- and path-tagged [`Diagnostics`]
//! - [`validator`]: the request/response call contract validators implement
//! - [`setvalidator`], [`mapvalidator`]: concrete validators
//!
//! Validators never fail with `Err`. Invalid configuration is reported by
//! appending diagnostics to the response the caller passed in.
//!
//! ## Quick Example
//!
//! ```rust
//! use attrvalidator::prelude::*;
//! use attrvalidator::{mapvalidator, setvalidator};
//!
//! let validator = mapvalidator::value_sets_are(vec![
//!     Box::new(setvalidator::size_at_least(1)),
//! ]);
//!
//! let empty = SetValue::new(AttrType::String, vec![]).unwrap();
//! let groups = MapValue::new(
//!     AttrType::set_of(AttrType::String),
//!     [("ops".to_string(), Value::Set(empty))],
//! )
//! .unwrap();
//!
//! let req = MapRequest::new(Path::root("groups"), groups, Config::empty());
//! let mut resp = MapResponse::default();
//! validator.validate_map(&Context::background(), &req, &mut resp);
//!
//! for diag in &resp.diagnostics {
//!     println!("{diag}");
//! }
//! assert!(resp.diagnostics.has_error());
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events while validating
//! - `serde`: `Serialize`/`Deserialize` for diagnostics and paths

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod diag;
pub mod mapvalidator;
pub mod path;
pub mod semigroup;
pub mod setvalidator;
pub mod testing;
pub mod types;
pub mod validator;

// Re-exports
pub use diag::{Diagnostic, Diagnostics, Severity};
pub use path::{Path, PathExpression, PathStep};
pub use semigroup::Semigroup;
pub use types::{
    AttrType, ConversionError, CustomType, CustomValue, ListValue, MapValue, SetValuable,
    SetValue, Value, ValueError, ValueState,
};
pub use validator::{
    Config, Context, Describe, MapRequest, MapResponse, MapValidator, SetRequest, SetResponse,
    SetValidator, SetValidators,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::diag::{Diagnostic, Diagnostics, Severity};
    pub use crate::path::{Path, PathExpression};
    pub use crate::semigroup::Semigroup;
    pub use crate::types::{AttrType, MapValue, SetValuable, SetValue, Value};
    pub use crate::validator::{
        Config, Context, Describe, MapRequest, MapResponse, MapValidator, SetRequest,
        SetResponse, SetValidator, SetValidators,
    };
}
