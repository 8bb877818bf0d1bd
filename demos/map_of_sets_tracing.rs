//! Validation with tracing output
//!
//! Run with: cargo run --example map_of_sets_tracing --features tracing

use attrvalidator::prelude::*;
use attrvalidator::{mapvalidator, setvalidator};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let validator = mapvalidator::value_sets_are(vec![Box::new(setvalidator::size_at_least(1))]);
    let ctx = Context::background();

    // Declared with the wrong element type: logged and reported once.
    let mistyped = MapValue::new(
        AttrType::list_of(AttrType::String),
        [("a".to_string(), Value::null(AttrType::list_of(AttrType::String)))],
    )
    .unwrap_or_else(|err| panic!("invalid demo map: {err}"));

    let req = MapRequest::new(Path::root("zones"), mistyped, Config::empty());
    let mut resp = MapResponse::default();
    validator.validate_map(&ctx, &req, &mut resp);

    for diag in &resp.diagnostics {
        tracing::warn!(summary = diag.summary(), "validation reported a problem");
    }
}
