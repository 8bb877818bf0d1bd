//! Validate every set stored in a map.

use crate::diag::Diagnostics;
use crate::types::SetValuable;
use crate::validator::{
    join_descriptions, Context, Describe, MapRequest, MapResponse, MapValidator, SetRequest,
    SetResponse, SetValidator, SetValidators,
};

/// Map validator that runs a list of set validators against each map value.
///
/// Created by [`value_sets_are`].
#[derive(Default)]
pub struct ValueSetsAre {
    element_validators: SetValidators,
}

impl std::fmt::Debug for ValueSetsAre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueSetsAre")
            .field("element_validators", &self.element_validators.len())
            .finish()
    }
}

/// Ensure every configured set value of a map passes each set validator.
///
/// Null (unconfigured) and unknown (resolved later) maps are skipped. Each
/// entry is checked against every validator, in order, and all resulting
/// diagnostics are kept.
///
/// # Examples
///
/// ```
/// use attrvalidator::prelude::*;
/// use attrvalidator::{mapvalidator, setvalidator};
///
/// let validator = mapvalidator::value_sets_are(vec![
///     Box::new(setvalidator::size_at_least(2)),
/// ]);
///
/// let set = |items: &[&str]| {
///     Value::Set(SetValue::new(
///         AttrType::String,
///         items.iter().map(|s| Value::string(*s)).collect(),
///     ).unwrap())
/// };
/// let tags = MapValue::new(
///     AttrType::set_of(AttrType::String),
///     [
///         ("a".to_string(), set(&["x", "y"])),
///         ("b".to_string(), set(&["z"])),
///     ],
/// )
/// .unwrap();
///
/// let req = MapRequest::new(Path::root("tags"), tags, Config::empty());
/// let mut resp = MapResponse::default();
/// validator.validate_map(&Context::background(), &req, &mut resp);
///
/// assert_eq!(resp.diagnostics.len(), 1);
/// assert_eq!(
///     resp.diagnostics.iter().next().unwrap().path(),
///     Some(&Path::root("tags").at_map_key("b")),
/// );
/// ```
pub fn value_sets_are(element_validators: SetValidators) -> ValueSetsAre {
    ValueSetsAre { element_validators }
}

impl ValueSetsAre {
    /// The set validators applied to each entry.
    pub fn element_validators(&self) -> &[Box<dyn SetValidator>] {
        &self.element_validators
    }
}

impl Describe for ValueSetsAre {
    fn description(&self, ctx: &Context) -> String {
        join_descriptions(&self.element_validators, ctx)
    }

    fn markdown_description(&self, ctx: &Context) -> String {
        self.description(ctx)
    }
}

impl MapValidator for ValueSetsAre {
    fn validate_map(&self, ctx: &Context, req: &MapRequest, resp: &mut MapResponse) {
        let map = &req.config_value;
        if map.is_null() || map.is_unknown() {
            return;
        }

        let element_type = map.element_type();
        if element_type.as_set_typable().is_err() {
            #[cfg(feature = "tracing")]
            tracing::debug!(path = %req.path, %element_type, "map element type is not set-typable");

            resp.diagnostics.add_attribute_error(
                req.path.clone(),
                "Invalid Validator for Element Type",
                format!(
                    "While performing schema-based validation, an unexpected error occurred. \
                     The attribute declares a Set values validator, however its values do not \
                     convert to a set type. \
                     Use the appropriate values validator that matches the element type. \
                     This is always an issue with the provider and should be reported to the \
                     provider developers.\n\n\
                     Path: {}\n\
                     Element Type: {}\n",
                    req.path, element_type
                ),
            );
            return;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            path = %req.path,
            entries = map.len(),
            validators = self.element_validators.len(),
            "validating map of sets"
        );

        for (key, element) in map.elements() {
            let element_path = req.path.at_map_key(key);

            // The element type check above should rule this out; report it
            // rather than skipping the entry.
            let valuable: &dyn SetValuable = match element.as_set_valuable() {
                Ok(valuable) => valuable,
                Err(_) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(path = %element_path, "map entry is not set-valuable");

                    resp.diagnostics.add_attribute_error(
                        req.path.clone(),
                        "Invalid Validator for Element Value",
                        format!(
                            "While performing schema-based validation, an unexpected error \
                             occurred. The attribute declares a Set values validator, however \
                             its values do not convert to a set value. \
                             This is likely an issue with the validation framework and should \
                             be reported to the provider developers.\n\n\
                             Path: {}\n\
                             Element Type: {}\n\
                             Element Value Type: {}\n",
                            req.path,
                            element_type,
                            element.ty()
                        ),
                    );
                    return;
                }
            };

            let (element_value, diags) = valuable.to_set_value();
            let conversion_failed = diags.has_error();
            resp.diagnostics.append(diags);

            // A conversion error will most likely repeat for every entry.
            if conversion_failed {
                #[cfg(feature = "tracing")]
                tracing::debug!(path = %element_path, "set conversion failed, stopping");
                return;
            }

            let element_req = SetRequest {
                path_expression: element_path.expression(),
                path: element_path,
                config_value: element_value,
                config: req.config.clone(),
            };

            resp.diagnostics.append(run_all(&self.element_validators, ctx, &element_req));
        }
    }
}

fn run_all(validators: &[Box<dyn SetValidator>], ctx: &Context, req: &SetRequest) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    for validator in validators {
        let mut element_resp = SetResponse::default();
        validator.validate_set(ctx, req, &mut element_resp);
        diagnostics.append(element_resp.diagnostics);
    }
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Path;
    use crate::setvalidator;
    use crate::types::{AttrType, MapValue, SetValue, Value};
    use crate::validator::Config;

    fn string_set(items: &[&str]) -> Value {
        Value::Set(
            SetValue::new(
                AttrType::String,
                items.iter().map(|s| Value::string(*s)).collect(),
            )
            .unwrap(),
        )
    }

    fn sample_map() -> MapValue {
        MapValue::new(
            AttrType::set_of(AttrType::String),
            [
                ("a".to_string(), string_set(&["x", "y"])),
                ("b".to_string(), string_set(&["z"])),
            ],
        )
        .unwrap()
    }

    fn run(validator: &ValueSetsAre, map: MapValue) -> Diagnostics {
        let req = MapRequest::new(Path::root("tags"), map, Config::empty());
        let mut resp = MapResponse::default();
        validator.validate_map(&Context::background(), &req, &mut resp);
        resp.diagnostics
    }

    #[test]
    fn only_undersized_entry_is_reported() {
        let validator = value_sets_are(vec![Box::new(setvalidator::size_at_least(2))]);
        let diags = run(&validator, sample_map());

        assert_eq!(diags.len(), 1);
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.path(), Some(&Path::root("tags").at_map_key("b")));
        assert_eq!(
            diag.detail(),
            r#"Attribute tags["b"] set must contain at least 2 elements, got: 1"#
        );
    }

    #[test]
    fn empty_validator_list_accepts_everything() {
        assert!(run(&value_sets_are(vec![]), sample_map()).is_empty());
    }

    #[test]
    fn null_and_unknown_maps_are_skipped() {
        let validator = value_sets_are(vec![Box::new(setvalidator::size_at_least(5))]);
        let elem = AttrType::set_of(AttrType::String);
        assert!(run(&validator, MapValue::null(elem.clone())).is_empty());
        assert!(run(&validator, MapValue::unknown(elem)).is_empty());
    }

    #[test]
    fn unknown_map_with_wrong_element_type_is_still_skipped() {
        let validator = value_sets_are(vec![]);
        assert!(run(&validator, MapValue::unknown(AttrType::String)).is_empty());
    }

    #[test]
    fn wrong_element_type_reports_once_at_map_path() {
        let validator = value_sets_are(vec![Box::new(setvalidator::size_at_least(2))]);
        let map = MapValue::new(
            AttrType::list_of(AttrType::String),
            [("a".to_string(), Value::null(AttrType::list_of(AttrType::String)))],
        )
        .unwrap();

        let diags = run(&validator, map);
        assert_eq!(diags.len(), 1);
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.summary(), "Invalid Validator for Element Type");
        assert_eq!(diag.path(), Some(&Path::root("tags")));
        assert!(diag.detail().contains("Path: tags\n"));
        assert!(diag.detail().contains("Element Type: List[String]\n"));
    }

    #[test]
    fn mistyped_entry_aborts_at_map_path() {
        let validator = value_sets_are(vec![Box::new(setvalidator::size_at_least(2))]);
        let map = MapValue::new_unchecked(
            AttrType::set_of(AttrType::String),
            [
                ("a".to_string(), Value::string("not a set")),
                ("b".to_string(), string_set(&["z"])),
            ],
        );

        let diags = run(&validator, map);
        assert_eq!(diags.len(), 1);
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.summary(), "Invalid Validator for Element Value");
        assert_eq!(diag.path(), Some(&Path::root("tags")));
        assert!(diag.detail().contains("Element Value Type: String\n"));
    }

    #[test]
    fn description_joins_sub_descriptions() {
        let ctx = Context::background();
        let validator = value_sets_are(vec![
            Box::new(setvalidator::size_at_least(1)),
            Box::new(setvalidator::size_at_most(3)),
        ]);
        assert_eq!(
            validator.description(&ctx),
            "set must contain at least 1 elements + set must contain at most 3 elements"
        );
        assert_eq!(validator.markdown_description(&ctx), validator.description(&ctx));
        assert_eq!(value_sets_are(vec![]).description(&ctx), "");
    }
}
