//! Size bounds on set values.

use crate::validator::validatordiag::invalid_attribute_value;
use crate::validator::{Context, Describe, SetRequest, SetResponse, SetValidator};

/// Set validator requiring at least `min` elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeAtLeast {
    min: usize,
}

/// Require a set to contain at least `min` elements.
///
/// Null and unknown sets are skipped.
///
/// # Example
///
/// ```rust
/// use attrvalidator::prelude::*;
/// use attrvalidator::setvalidator;
///
/// let v = setvalidator::size_at_least(2);
/// assert_eq!(
///     v.description(&Context::background()),
///     "set must contain at least 2 elements"
/// );
/// ```
pub fn size_at_least(min: usize) -> SizeAtLeast {
    SizeAtLeast { min }
}

impl Describe for SizeAtLeast {
    fn description(&self, _ctx: &Context) -> String {
        format!("set must contain at least {} elements", self.min)
    }

    fn markdown_description(&self, ctx: &Context) -> String {
        self.description(ctx)
    }
}

impl SetValidator for SizeAtLeast {
    fn validate_set(&self, ctx: &Context, req: &SetRequest, resp: &mut SetResponse) {
        check_size(self, ctx, req, resp, |len| len >= self.min);
    }
}

/// Set validator allowing at most `max` elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeAtMost {
    max: usize,
}

/// Require a set to contain at most `max` elements.
///
/// Null and unknown sets are skipped.
pub fn size_at_most(max: usize) -> SizeAtMost {
    SizeAtMost { max }
}

impl Describe for SizeAtMost {
    fn description(&self, _ctx: &Context) -> String {
        format!("set must contain at most {} elements", self.max)
    }

    fn markdown_description(&self, ctx: &Context) -> String {
        self.description(ctx)
    }
}

impl SetValidator for SizeAtMost {
    fn validate_set(&self, ctx: &Context, req: &SetRequest, resp: &mut SetResponse) {
        check_size(self, ctx, req, resp, |len| len <= self.max);
    }
}

/// Set validator bounding the element count on both sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeBetween {
    min: usize,
    max: usize,
}

/// Require a set to contain between `min` and `max` elements, inclusive.
///
/// Null and unknown sets are skipped.
pub fn size_between(min: usize, max: usize) -> SizeBetween {
    SizeBetween { min, max }
}

impl Describe for SizeBetween {
    fn description(&self, _ctx: &Context) -> String {
        format!(
            "set must contain at least {} elements and at most {} elements",
            self.min, self.max
        )
    }

    fn markdown_description(&self, ctx: &Context) -> String {
        self.description(ctx)
    }
}

impl SetValidator for SizeBetween {
    fn validate_set(&self, ctx: &Context, req: &SetRequest, resp: &mut SetResponse) {
        check_size(self, ctx, req, resp, |len| {
            (self.min..=self.max).contains(&len)
        });
    }
}

fn check_size(
    validator: &impl Describe,
    ctx: &Context,
    req: &SetRequest,
    resp: &mut SetResponse,
    within: impl FnOnce(usize) -> bool,
) {
    let set = &req.config_value;
    if set.is_null() || set.is_unknown() {
        return;
    }

    let len = set.len();
    if !within(len) {
        resp.diagnostics.push(invalid_attribute_value(
            &req.path,
            &validator.description(ctx),
            len,
        ));
    }
}
