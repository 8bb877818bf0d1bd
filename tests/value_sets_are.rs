//! Integration tests for the map-of-sets validator.
//!
//! Covers the concrete scenarios (undersized entries, empty validator lists,
//! unset maps), custom set types whose conversion reports diagnostics, and
//! what sub-validators actually receive.

use attrvalidator::prelude::*;
use attrvalidator::testing::RecordingSetValidator;
use attrvalidator::{assert_diagnostic_count, assert_error_at, assert_no_diagnostics};
use attrvalidator::{mapvalidator, setvalidator, CustomType, CustomValue};

fn string_set(items: &[&str]) -> Value {
    Value::Set(
        SetValue::new(
            AttrType::String,
            items.iter().map(|s| Value::string(*s)).collect(),
        )
        .unwrap(),
    )
}

fn tags() -> MapValue {
    MapValue::new(
        AttrType::set_of(AttrType::String),
        [
            ("a".to_string(), string_set(&["x", "y"])),
            ("b".to_string(), string_set(&["z"])),
        ],
    )
    .unwrap()
}

fn validate(validator: &dyn MapValidator, map: MapValue, config: Config) -> Diagnostics {
    let req = MapRequest::new(Path::root("tags"), map, config);
    let mut resp = MapResponse::default();
    validator.validate_map(&Context::background(), &req, &mut resp);
    resp.diagnostics
}

// Custom set type: a comma-separated string that converts to a set of strings.

#[derive(Debug)]
struct CsvSetType;

impl CustomType for CsvSetType {
    fn name(&self) -> &str {
        "CsvSetType"
    }

    fn set_element_type(&self) -> Option<AttrType> {
        Some(AttrType::String)
    }
}

#[derive(Debug)]
struct CsvSet(&'static str);

impl CustomValue for CsvSet {
    fn ty(&self) -> AttrType {
        AttrType::custom(CsvSetType)
    }

    fn is_null(&self) -> bool {
        false
    }

    fn is_unknown(&self) -> bool {
        false
    }

    fn as_set_valuable(&self) -> Option<&dyn SetValuable> {
        Some(self)
    }
}

impl SetValuable for CsvSet {
    fn to_set_value(&self) -> (SetValue, Diagnostics) {
        let mut diags = Diagnostics::new();
        let mut items = Vec::new();
        for segment in self.0.split(',') {
            if segment.is_empty() {
                diags.add_warning("Empty Segment", format!("ignored empty segment in {:?}", self.0));
            } else if segment.contains(' ') {
                diags.add_error("Invalid Segment", format!("segment {segment:?} contains a space"));
            } else {
                items.push(Value::string(segment));
            }
        }
        match SetValue::new(AttrType::String, items) {
            Ok(set) => (set, diags),
            Err(err) => {
                diags.add_error("Conversion Failed", err.to_string());
                (SetValue::unknown(AttrType::String), diags)
            }
        }
    }
}

fn csv_map(entries: &[(&str, &'static str)]) -> MapValue {
    MapValue::new(
        AttrType::custom(CsvSetType),
        entries
            .iter()
            .map(|&(k, raw)| (k.to_string(), Value::custom(CsvSet(raw)))),
    )
    .unwrap()
}

#[test]
fn reports_only_the_undersized_entry() {
    let validator = mapvalidator::value_sets_are(vec![Box::new(setvalidator::size_at_least(2))]);
    let diags = validate(&validator, tags(), Config::empty());

    assert_diagnostic_count!(diags, 1);
    assert_error_at!(diags, Path::root("tags").at_map_key("b"));
}

#[test]
fn empty_validator_list_reports_nothing() {
    let validator = mapvalidator::value_sets_are(vec![]);
    assert_no_diagnostics!(validate(&validator, tags(), Config::empty()));
}

#[test]
fn unknown_map_reports_nothing() {
    let recorder = RecordingSetValidator::new("rec").fail_all();
    let validator = mapvalidator::value_sets_are(vec![Box::new(recorder)]);
    let map = MapValue::unknown(AttrType::set_of(AttrType::String));
    assert_no_diagnostics!(validate(&validator, map, Config::empty()));
}

#[test]
fn failures_accumulate_across_entries_and_validators() {
    let validator = mapvalidator::value_sets_are(vec![
        Box::new(setvalidator::size_at_least(3)),
        Box::new(setvalidator::size_at_most(1)),
        Box::new(RecordingSetValidator::new("rec").fail_all()),
    ]);
    let diags = validate(&validator, tags(), Config::empty());

    // a: at_least(3) + at_most(1) + rec; b: at_least(3) + rec
    assert_diagnostic_count!(diags, 5);
    let a_errors = diags
        .iter()
        .filter(|d| d.path() == Some(&Path::root("tags").at_map_key("a")))
        .count();
    assert_eq!(a_errors, 3);
}

#[test]
fn diagnostics_follow_entry_then_validator_order() {
    let validator = mapvalidator::value_sets_are(vec![
        Box::new(RecordingSetValidator::new("first").fail_all()),
        Box::new(RecordingSetValidator::new("second").fail_all()),
    ]);
    let diags = validate(&validator, tags(), Config::empty());

    let details: Vec<&str> = diags.iter().map(Diagnostic::detail).collect();
    assert_eq!(
        details,
        vec![
            r#"first rejected tags["a"]"#,
            r#"second rejected tags["a"]"#,
            r#"first rejected tags["b"]"#,
            r#"second rejected tags["b"]"#,
        ]
    );
}

#[test]
fn sub_validators_receive_entry_path_expression_and_config() {
    let recorder = std::sync::Arc::new(RecordingSetValidator::new("rec"));
    let validator = mapvalidator::value_sets_are(vec![Box::new(SharedRecorder(recorder.clone()))]);
    let config = Config::new(Value::string("whole config"));

    assert_no_diagnostics!(validate(&validator, tags(), config.clone()));

    let seen = recorder.seen();
    assert_eq!(seen.len(), 2);
    for (req, key) in seen.iter().zip(["a", "b"]) {
        let expected = Path::root("tags").at_map_key(key);
        assert_eq!(req.path, expected);
        assert!(req.path_expression.matches(&expected));
        assert!(req.config.same_as(&config));
    }
    assert_eq!(seen[1].config_value.len(), 1);
}

#[test]
fn null_entries_reach_sub_validators_as_null_sets() {
    let map = MapValue::new(
        AttrType::set_of(AttrType::String),
        [("a".to_string(), Value::null(AttrType::set_of(AttrType::String)))],
    )
    .unwrap();
    let recorder = std::sync::Arc::new(RecordingSetValidator::new("rec"));
    let validator = mapvalidator::value_sets_are(vec![
        Box::new(setvalidator::size_at_least(1)),
        Box::new(SharedRecorder(recorder.clone())),
    ]);

    assert_no_diagnostics!(validate(&validator, map, Config::empty()));
    assert!(recorder.seen()[0].config_value.is_null());
}

#[test]
fn non_set_element_type_reports_once_at_map_path() {
    let map = MapValue::new(
        AttrType::String,
        [
            ("a".to_string(), Value::string("x")),
            ("b".to_string(), Value::string("y")),
        ],
    )
    .unwrap();
    let recorder = std::sync::Arc::new(RecordingSetValidator::new("rec"));
    let validator = mapvalidator::value_sets_are(vec![Box::new(SharedRecorder(recorder.clone()))]);

    let diags = validate(&validator, map, Config::empty());
    assert_diagnostic_count!(diags, 1);
    assert_error_at!(diags, Path::root("tags"));
    assert_eq!(recorder.calls(), 0);
}

#[test]
fn custom_set_types_are_validated() {
    let validator = mapvalidator::value_sets_are(vec![Box::new(setvalidator::size_at_most(2))]);
    let map = csv_map(&[("ok", "x,y"), ("big", "x,y,z")]);

    let diags = validate(&validator, map, Config::empty());
    assert_diagnostic_count!(diags, 1);
    assert_error_at!(diags, Path::root("tags").at_map_key("big"));
}

#[test]
fn conversion_warnings_pass_through_and_validation_continues() {
    let validator = mapvalidator::value_sets_are(vec![Box::new(setvalidator::size_at_least(2))]);
    let map = csv_map(&[("a", "x,,y"), ("b", "z")]);

    let diags = validate(&validator, map, Config::empty());
    assert_eq!(diags.warning_count(), 1);
    assert_eq!(diags.error_count(), 1);
    assert_error_at!(diags, Path::root("tags").at_map_key("b"));
}

#[test]
fn conversion_error_aborts_remaining_entries() {
    let recorder = std::sync::Arc::new(RecordingSetValidator::new("rec").fail_all());
    let validator = mapvalidator::value_sets_are(vec![Box::new(SharedRecorder(recorder.clone()))]);
    // Keys iterate in order: "a" is validated, "b" fails to convert, "c" is never reached.
    let map = csv_map(&[("a", "x"), ("b", "bad value"), ("c", "y")]);

    let diags = validate(&validator, map, Config::empty());
    let summaries: Vec<&str> = diags.iter().map(Diagnostic::summary).collect();
    assert_eq!(summaries, vec!["Recorded Failure", "Invalid Segment"]);
    assert_eq!(recorder.seen_paths(), vec![Path::root("tags").at_map_key("a")]);
}

#[test]
fn unset_custom_set_entries_reach_sub_validators_as_unset_sets() {
    let map = MapValue::new(
        AttrType::custom(CsvSetType),
        [
            ("a".to_string(), Value::null(AttrType::custom(CsvSetType))),
            ("b".to_string(), Value::unknown(AttrType::custom(CsvSetType))),
            ("c".to_string(), Value::custom(CsvSet("z"))),
        ],
    )
    .unwrap();
    let recorder = std::sync::Arc::new(RecordingSetValidator::new("rec"));
    let validator = mapvalidator::value_sets_are(vec![
        Box::new(setvalidator::size_at_least(2)),
        Box::new(SharedRecorder(recorder.clone())),
    ]);

    let diags = validate(&validator, map, Config::empty());
    assert_diagnostic_count!(diags, 1);
    assert_error_at!(diags, Path::root("tags").at_map_key("c"));
    assert!(!diags
        .iter()
        .any(|diag| diag.summary().starts_with("Invalid Validator")));

    let seen = recorder.seen();
    assert_eq!(seen.len(), 3);
    assert!(seen[0].config_value.is_null());
    assert!(seen[1].config_value.is_unknown());
    assert_eq!(seen[0].config_value.element_type(), &AttrType::String);
    assert_eq!(seen[2].config_value.len(), 1);
}

#[test]
fn description_joins_with_plus() {
    let ctx = Context::background();
    let validator = mapvalidator::value_sets_are(vec![
        Box::new(RecordingSetValidator::new("first")),
        Box::new(RecordingSetValidator::new("second")),
        Box::new(setvalidator::size_between(1, 2)),
    ]);
    assert_eq!(
        validator.description(&ctx),
        "first + second + set must contain at least 1 elements and at most 2 elements"
    );
    assert_eq!(
        validator.markdown_description(&ctx),
        validator.description(&ctx)
    );
}

/// Lets a test keep a handle on a recorder that the validator owns.
#[derive(Debug)]
struct SharedRecorder(std::sync::Arc<RecordingSetValidator>);

impl Describe for SharedRecorder {
    fn description(&self, ctx: &Context) -> String {
        self.0.description(ctx)
    }

    fn markdown_description(&self, ctx: &Context) -> String {
        self.0.markdown_description(ctx)
    }
}

impl SetValidator for SharedRecorder {
    fn validate_set(&self, ctx: &Context, req: &SetRequest, resp: &mut SetResponse) {
        self.0.validate_set(ctx, req, resp)
    }
}
