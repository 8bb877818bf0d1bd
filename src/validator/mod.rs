//! The attribute validator call contract
//!
//! A validator is anything that can describe itself ([`Describe`]) and check a
//! configured value of one attribute kind. The host builds a request holding
//! the value, where it lives, and a handle to the whole configuration; the
//! validator appends diagnostics to the response it was given and returns
//! nothing.
//!
//! Validators of the same kind compose as lists of trait objects
//! ([`SetValidators`]), applied in order.
//!
//! # Examples
//!
//! ```
//! use attrvalidator::prelude::*;
//! use attrvalidator::setvalidator;
//!
//! let validator = setvalidator::size_at_most(1);
//! let ctx = Context::background();
//!
//! let set = SetValue::new(
//!     AttrType::String,
//!     vec![Value::string("a"), Value::string("b")],
//! )
//! .unwrap();
//! let req = SetRequest::new(Path::root("zones"), set, Config::empty());
//! let mut resp = SetResponse::default();
//!
//! validator.validate_set(&ctx, &req, &mut resp);
//! assert_eq!(resp.diagnostics.error_count(), 1);
//! ```

pub mod validatordiag;

use std::sync::Arc;

use crate::diag::Diagnostics;
use crate::path::{Path, PathExpression};
use crate::types::{MapValue, SetValue, Value};

/// Call context handed to every validator.
///
/// It carries no cancellation or deadline. Validators forward it unchanged to
/// anything they delegate to.
#[derive(Debug, Clone, Copy, Default)]
pub struct Context {
    _private: (),
}

impl Context {
    /// A fresh context.
    pub fn background() -> Self {
        Self::default()
    }
}

/// Handle to the full configuration a value was taken from.
///
/// Cloning is cheap; validators pass it through to sub-requests unmodified.
#[derive(Debug, Clone, Default)]
pub struct Config {
    raw: Option<Arc<Value>>,
}

impl Config {
    /// A configuration with no content.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap the root value of a configuration.
    pub fn new(raw: Value) -> Self {
        Self {
            raw: Some(Arc::new(raw)),
        }
    }

    /// Root value, if any.
    pub fn raw(&self) -> Option<&Value> {
        self.raw.as_deref()
    }

    /// True when both handles point at the same configuration.
    pub fn same_as(&self, other: &Config) -> bool {
        match (&self.raw, &other.raw) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

/// Human-readable description of what a validator enforces.
pub trait Describe {
    /// Plain-text description.
    fn description(&self, ctx: &Context) -> String;

    /// Markdown description.
    fn markdown_description(&self, ctx: &Context) -> String;
}

/// Request to validate a set value.
#[derive(Debug, Clone)]
pub struct SetRequest {
    /// Where the value lives.
    pub path: Path,
    /// Expression form of `path`.
    pub path_expression: PathExpression,
    /// The configured value.
    pub config_value: SetValue,
    /// The whole configuration.
    pub config: Config,
}

impl SetRequest {
    /// Request at `path`, with the exact expression for that path.
    pub fn new(path: Path, config_value: SetValue, config: Config) -> Self {
        Self {
            path_expression: path.expression(),
            path,
            config_value,
            config,
        }
    }
}

/// Response to a [`SetRequest`].
#[derive(Debug, Clone, Default)]
pub struct SetResponse {
    /// Diagnostics raised by the validator.
    pub diagnostics: Diagnostics,
}

/// Request to validate a map value.
#[derive(Debug, Clone)]
pub struct MapRequest {
    /// Where the value lives.
    pub path: Path,
    /// Expression form of `path`.
    pub path_expression: PathExpression,
    /// The configured value.
    pub config_value: MapValue,
    /// The whole configuration.
    pub config: Config,
}

impl MapRequest {
    /// Request at `path`, with the exact expression for that path.
    pub fn new(path: Path, config_value: MapValue, config: Config) -> Self {
        Self {
            path_expression: path.expression(),
            path,
            config_value,
            config,
        }
    }
}

/// Response to a [`MapRequest`].
#[derive(Debug, Clone, Default)]
pub struct MapResponse {
    /// Diagnostics raised by the validator.
    pub diagnostics: Diagnostics,
}

/// Validates set values.
pub trait SetValidator: Describe + Send + Sync {
    /// Check `req.config_value`, appending any problems to `resp`.
    fn validate_set(&self, ctx: &Context, req: &SetRequest, resp: &mut SetResponse);
}

/// Validates map values.
pub trait MapValidator: Describe + Send + Sync {
    /// Check `req.config_value`, appending any problems to `resp`.
    fn validate_map(&self, ctx: &Context, req: &MapRequest, resp: &mut MapResponse);
}

/// Ordered list of set validators.
pub type SetValidators = Vec<Box<dyn SetValidator>>;

impl<V: Describe + ?Sized> Describe for Box<V> {
    fn description(&self, ctx: &Context) -> String {
        (**self).description(ctx)
    }

    fn markdown_description(&self, ctx: &Context) -> String {
        (**self).markdown_description(ctx)
    }
}

impl<V: SetValidator + ?Sized> SetValidator for Box<V> {
    fn validate_set(&self, ctx: &Context, req: &SetRequest, resp: &mut SetResponse) {
        (**self).validate_set(ctx, req, resp)
    }
}

impl<V: MapValidator + ?Sized> MapValidator for Box<V> {
    fn validate_map(&self, ctx: &Context, req: &MapRequest, resp: &mut MapResponse) {
        (**self).validate_map(ctx, req, resp)
    }
}

/// Join the descriptions of `validators` with `" + "`, in order.
pub(crate) fn join_descriptions<V: Describe>(validators: &[V], ctx: &Context) -> String {
    validators
        .iter()
        .map(|v| v.description(ctx))
        .collect::<Vec<_>>()
        .join(" + ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttrType;

    #[test]
    fn set_request_uses_exact_expression() {
        let path = Path::root("tags").at_map_key("a");
        let req = SetRequest::new(path.clone(), SetValue::null(AttrType::String), Config::empty());
        assert!(req.path_expression.matches(&path));
        assert_eq!(req.path_expression.to_string(), r#"tags["a"]"#);
    }

    #[test]
    fn config_clones_share_the_same_tree() {
        let config = Config::new(Value::string("root"));
        let copy = config.clone();
        assert!(config.same_as(&copy));
        assert!(!config.same_as(&Config::new(Value::string("root"))));
        assert!(Config::empty().same_as(&Config::empty()));
        assert_eq!(copy.raw(), Some(&Value::string("root")));
    }
}
