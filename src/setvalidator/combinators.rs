//! Combining set validators.

use std::fmt;

use crate::diag::Diagnostics;
use crate::semigroup::Semigroup;
use crate::validator::{
    join_descriptions, Context, Describe, SetRequest, SetResponse, SetValidator, SetValidators,
};

/// Set validator that requires every inner validator to pass.
pub struct All {
    validators: SetValidators,
}

/// Require every validator in `validators` to pass.
///
/// All validators run, in order; every diagnostic is kept.
///
/// # Example
///
/// ```rust
/// use attrvalidator::prelude::*;
/// use attrvalidator::setvalidator;
///
/// let v = setvalidator::all(vec![
///     Box::new(setvalidator::size_at_least(1)),
///     Box::new(setvalidator::size_at_most(3)),
/// ]);
/// assert_eq!(
///     v.description(&Context::background()),
///     "Value must satisfy all of the validations: \
///      set must contain at least 1 elements + set must contain at most 3 elements"
/// );
/// ```
pub fn all(validators: SetValidators) -> All {
    All { validators }
}

impl fmt::Debug for All {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("All")
            .field("validators", &self.validators.len())
            .finish()
    }
}

impl Describe for All {
    fn description(&self, ctx: &Context) -> String {
        format!(
            "Value must satisfy all of the validations: {}",
            join_descriptions(&self.validators, ctx)
        )
    }

    fn markdown_description(&self, ctx: &Context) -> String {
        self.description(ctx)
    }
}

impl SetValidator for All {
    fn validate_set(&self, ctx: &Context, req: &SetRequest, resp: &mut SetResponse) {
        let collected = self
            .validators
            .iter()
            .map(|validator| {
                let mut inner = SetResponse::default();
                validator.validate_set(ctx, req, &mut inner);
                inner.diagnostics
            })
            .fold(Diagnostics::new(), Semigroup::combine);
        resp.diagnostics.append(collected);
    }
}

/// Set validator that passes when any inner validator passes.
pub struct Any {
    validators: SetValidators,
}

/// Require at least one validator in `validators` to pass.
///
/// Validators run in order until one reports no error; only that validator's
/// diagnostics (warnings) are kept. When all fail, every diagnostic is kept.
pub fn any(validators: SetValidators) -> Any {
    Any { validators }
}

impl fmt::Debug for Any {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Any")
            .field("validators", &self.validators.len())
            .finish()
    }
}

impl Describe for Any {
    fn description(&self, ctx: &Context) -> String {
        format!(
            "Value must satisfy at least one of the validations: {}",
            join_descriptions(&self.validators, ctx)
        )
    }

    fn markdown_description(&self, ctx: &Context) -> String {
        self.description(ctx)
    }
}

impl SetValidator for Any {
    fn validate_set(&self, ctx: &Context, req: &SetRequest, resp: &mut SetResponse) {
        let mut failures = Diagnostics::new();
        for validator in &self.validators {
            let mut inner = SetResponse::default();
            validator.validate_set(ctx, req, &mut inner);
            if !inner.diagnostics.has_error() {
                resp.diagnostics.append(inner.diagnostics);
                return;
            }
            failures.append(inner.diagnostics);
        }
        resp.diagnostics.append(failures);
    }
}
