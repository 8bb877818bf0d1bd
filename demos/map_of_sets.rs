//! Validating a map of sets
//!
//! Run with: cargo run --example map_of_sets

use attrvalidator::prelude::*;
use attrvalidator::{mapvalidator, setvalidator};

fn string_set(items: &[&str]) -> Value {
    let elements = items.iter().map(|s| Value::string(*s)).collect();
    match SetValue::new(AttrType::String, elements) {
        Ok(set) => Value::Set(set),
        Err(err) => panic!("invalid demo set: {err}"),
    }
}

fn main() {
    let ctx = Context::background();

    // Every team needs between 2 and 4 members, none of them "root".
    let validator = mapvalidator::value_sets_are(vec![
        Box::new(setvalidator::size_between(2, 4)),
        Box::new(setvalidator::from_fn("must not contain \"root\"", |path, set| {
            let mut diags = Diagnostics::new();
            if set.elements().contains(&Value::string("root")) {
                diags.add_attribute_error(
                    path.clone(),
                    "Reserved Member",
                    format!("Attribute {path} must not contain \"root\""),
                );
            }
            diags
        })),
    ]);

    println!("Rule: {}\n", validator.description(&ctx));

    let teams = MapValue::new(
        AttrType::set_of(AttrType::String),
        [
            ("dev".to_string(), string_set(&["alice", "bob"])),
            ("ops".to_string(), string_set(&["carol"])),
            ("sec".to_string(), string_set(&["dave", "root"])),
        ],
    )
    .unwrap_or_else(|err| panic!("invalid demo map: {err}"));

    let req = MapRequest::new(Path::root("teams"), teams, Config::empty());
    let mut resp = MapResponse::default();
    validator.validate_map(&ctx, &req, &mut resp);

    if resp.diagnostics.is_empty() {
        println!("teams: ok");
    }
    for diag in &resp.diagnostics {
        println!("{diag}\n");
    }
}
