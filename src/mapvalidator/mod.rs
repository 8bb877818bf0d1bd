//! Validators for map attributes.

mod value_sets_are;

pub use value_sets_are::{value_sets_are, ValueSetsAre};
