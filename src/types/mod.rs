//! Attribute types and values
//!
//! The minimal type system validators work against: primitive values, lists,
//! sets and maps, each of which may be null (not configured) or unknown (only
//! resolvable later), plus hooks for provider-defined custom types.
//!
//! Conversions that a dynamically typed host would perform with a runtime type
//! assertion are explicit, fallible functions here:
//!
//! - [`AttrType::as_set_typable`] answers "do values of this type convert to sets?"
//! - [`Value::as_set_valuable`] answers "give me the set view of this value"
//!
//! # Examples
//!
//! ```
//! use attrvalidator::{AttrType, MapValue, SetValue, Value};
//!
//! let admins = SetValue::new(AttrType::String, vec![Value::string("alice")]).unwrap();
//! let groups = MapValue::new(
//!     AttrType::set_of(AttrType::String),
//!     [("admins".to_string(), Value::Set(admins))],
//! )
//! .unwrap();
//!
//! assert!(groups.element_type().is_set_typable());
//! assert_eq!(groups.len(), 1);
//! ```

mod attr_type;
mod error;
mod value;

pub use attr_type::{AttrType, CustomType};
pub use error::{ConversionError, ValueError};
pub use value::{CustomValue, ListValue, MapValue, SetValuable, SetValue, Value, ValueState};
