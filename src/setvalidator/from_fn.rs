//! Set validators from closures.

use std::fmt;

use crate::diag::Diagnostics;
use crate::path::Path;
use crate::types::SetValue;
use crate::validator::{Context, Describe, SetRequest, SetResponse, SetValidator};

/// Set validator backed by a closure.
///
/// Created by [`from_fn`].
pub struct FromFn<F> {
    description: String,
    check: F,
}

/// Build a set validator from a description and a check function.
///
/// The closure receives the request path and the configured set, and returns
/// the diagnostics to append. Unlike the built-in validators, null and unknown
/// sets are passed through; the closure decides what to do with them.
///
/// # Example
///
/// ```rust
/// use attrvalidator::prelude::*;
/// use attrvalidator::setvalidator;
///
/// let no_wildcards = setvalidator::from_fn("must not contain \"*\"", |path, set| {
///     let mut diags = Diagnostics::new();
///     if set.elements().contains(&Value::string("*")) {
///         diags.add_attribute_error(path.clone(), "Wildcard Not Allowed", "remove \"*\"");
///     }
///     diags
/// });
///
/// assert_eq!(
///     no_wildcards.description(&Context::background()),
///     "must not contain \"*\""
/// );
/// ```
pub fn from_fn<F>(description: impl Into<String>, check: F) -> FromFn<F>
where
    F: Fn(&Path, &SetValue) -> Diagnostics + Send + Sync,
{
    FromFn {
        description: description.into(),
        check,
    }
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl<F> Describe for FromFn<F> {
    fn description(&self, _ctx: &Context) -> String {
        self.description.clone()
    }

    fn markdown_description(&self, _ctx: &Context) -> String {
        self.description.clone()
    }
}

impl<F> SetValidator for FromFn<F>
where
    F: Fn(&Path, &SetValue) -> Diagnostics + Send + Sync,
{
    fn validate_set(&self, _ctx: &Context, req: &SetRequest, resp: &mut SetResponse) {
        resp.diagnostics
            .append((self.check)(&req.path, &req.config_value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AttrType, Value};
    use crate::validator::Config;

    #[test]
    fn closure_sees_path_and_value() {
        let v = from_fn("has x", |path, set| {
            let mut diags = Diagnostics::new();
            if !set.elements().contains(&Value::string("x")) {
                diags.add_attribute_error(path.clone(), "Missing x", "");
            }
            diags
        });

        let set = SetValue::new(AttrType::String, vec![Value::string("y")]).unwrap();
        let req = SetRequest::new(Path::root("tags").at_map_key("k"), set, Config::empty());
        let mut resp = SetResponse::default();
        v.validate_set(&Context::background(), &req, &mut resp);

        let diag = resp.diagnostics.iter().next().unwrap();
        assert_eq!(diag.path(), Some(&Path::root("tags").at_map_key("k")));
    }
}
