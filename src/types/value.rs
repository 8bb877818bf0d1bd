//! Attribute values.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::{AttrType, ConversionError, ValueError};
use crate::diag::Diagnostics;

/// Whether a value is unset, not yet known, or present.
///
/// # Examples
///
/// ```
/// use attrvalidator::ValueState;
///
/// let state = ValueState::Known(3);
/// assert_eq!(state.known(), Some(&3));
/// assert!(ValueState::<i32>::Unknown.is_unknown());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueState<T> {
    /// Not configured.
    Null,
    /// Configured, but only resolvable later.
    Unknown,
    /// Configured and resolved.
    Known(T),
}

impl<T> ValueState<T> {
    /// True for [`ValueState::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, ValueState::Null)
    }

    /// True for [`ValueState::Unknown`].
    pub fn is_unknown(&self) -> bool {
        matches!(self, ValueState::Unknown)
    }

    /// The contents, when known.
    pub fn known(&self) -> Option<&T> {
        match self {
            ValueState::Known(value) => Some(value),
            _ => None,
        }
    }
}

/// Anything that can be turned into a concrete [`SetValue`].
///
/// Conversion may report diagnostics. Callers must treat any error among them
/// as a failed conversion and ignore the returned set.
pub trait SetValuable {
    /// Convert to a set, with any diagnostics raised while doing so.
    fn to_set_value(&self) -> (SetValue, Diagnostics);
}

/// A provider-defined value layered over the built-in ones.
pub trait CustomValue: fmt::Debug + Send + Sync {
    /// Type of this value.
    fn ty(&self) -> AttrType;

    /// True when the value is not configured.
    fn is_null(&self) -> bool;

    /// True when the value is only resolvable later.
    fn is_unknown(&self) -> bool;

    /// Set view of this value, if it supports one.
    fn as_set_valuable(&self) -> Option<&dyn SetValuable> {
        None
    }
}

/// A configuration value.
#[derive(Debug, Clone)]
pub enum Value {
    /// Boolean.
    Bool(ValueState<bool>),
    /// Integer.
    Int64(ValueState<i64>),
    /// String.
    String(ValueState<String>),
    /// List.
    List(ListValue),
    /// Set.
    Set(SetValue),
    /// Map.
    Map(MapValue),
    /// Provider-defined value.
    Custom(Arc<dyn CustomValue>),
}

impl Value {
    /// A known boolean.
    pub fn bool(value: bool) -> Self {
        Value::Bool(ValueState::Known(value))
    }

    /// A known integer.
    pub fn int64(value: i64) -> Self {
        Value::Int64(ValueState::Known(value))
    }

    /// A known string.
    pub fn string(value: impl Into<String>) -> Self {
        Value::String(ValueState::Known(value.into()))
    }

    /// Wrap a custom value.
    pub fn custom(value: impl CustomValue + 'static) -> Self {
        Value::Custom(Arc::new(value))
    }

    /// The null value of `ty`.
    pub fn null(ty: AttrType) -> Self {
        Self::unset(ty, false)
    }

    /// The unknown value of `ty`.
    pub fn unknown(ty: AttrType) -> Self {
        Self::unset(ty, true)
    }

    fn unset(ty: AttrType, unknown: bool) -> Self {
        fn state<T>(unknown: bool) -> ValueState<T> {
            if unknown {
                ValueState::Unknown
            } else {
                ValueState::Null
            }
        }
        match ty {
            AttrType::Bool => Value::Bool(state(unknown)),
            AttrType::Int64 => Value::Int64(state(unknown)),
            AttrType::String => Value::String(state(unknown)),
            AttrType::List(elem) => Value::List(ListValue {
                element_type: *elem,
                state: state(unknown),
            }),
            AttrType::Set(elem) => Value::Set(SetValue {
                element_type: *elem,
                state: state(unknown),
            }),
            AttrType::Map(elem) => Value::Map(MapValue {
                element_type: *elem,
                state: state(unknown),
            }),
            AttrType::Custom(custom) => {
                let set_view = custom
                    .set_element_type()
                    .map(|element_type| UnsetSet {
                        element_type,
                        unknown,
                    });
                Value::Custom(Arc::new(UnsetCustom {
                    ty: AttrType::Custom(custom),
                    unknown,
                    set_view,
                }))
            }
        }
    }

    /// Type of this value.
    pub fn ty(&self) -> AttrType {
        match self {
            Value::Bool(_) => AttrType::Bool,
            Value::Int64(_) => AttrType::Int64,
            Value::String(_) => AttrType::String,
            Value::List(list) => AttrType::list_of(list.element_type.clone()),
            Value::Set(set) => AttrType::set_of(set.element_type.clone()),
            Value::Map(map) => AttrType::map_of(map.element_type.clone()),
            Value::Custom(custom) => custom.ty(),
        }
    }

    /// True when the value is not configured.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Bool(state) => state.is_null(),
            Value::Int64(state) => state.is_null(),
            Value::String(state) => state.is_null(),
            Value::List(list) => list.state.is_null(),
            Value::Set(set) => set.state.is_null(),
            Value::Map(map) => map.state.is_null(),
            Value::Custom(custom) => custom.is_null(),
        }
    }

    /// True when the value is only resolvable later.
    pub fn is_unknown(&self) -> bool {
        match self {
            Value::Bool(state) => state.is_unknown(),
            Value::Int64(state) => state.is_unknown(),
            Value::String(state) => state.is_unknown(),
            Value::List(list) => list.state.is_unknown(),
            Value::Set(set) => set.state.is_unknown(),
            Value::Map(map) => map.state.is_unknown(),
            Value::Custom(custom) => custom.is_unknown(),
        }
    }

    /// Set view of this value.
    ///
    /// Built-in sets always convert; custom values convert when they expose
    /// [`CustomValue::as_set_valuable`].
    pub fn as_set_valuable(&self) -> Result<&dyn SetValuable, ConversionError> {
        match self {
            Value::Set(set) => Ok(set),
            Value::Custom(custom) => {
                custom
                    .as_set_valuable()
                    .ok_or_else(|| ConversionError::NotSetValuable {
                        found: self.ty(),
                    })
            }
            _ => Err(ConversionError::NotSetValuable { found: self.ty() }),
        }
    }
}

/// Null or unknown placeholder for a custom type without its own value type.
#[derive(Debug)]
struct UnsetCustom {
    ty: AttrType,
    unknown: bool,
    set_view: Option<UnsetSet>,
}

/// Set view of an unset custom value whose type is set-typable.
#[derive(Debug)]
struct UnsetSet {
    element_type: AttrType,
    unknown: bool,
}

impl SetValuable for UnsetSet {
    fn to_set_value(&self) -> (SetValue, Diagnostics) {
        let set = if self.unknown {
            SetValue::unknown(self.element_type.clone())
        } else {
            SetValue::null(self.element_type.clone())
        };
        (set, Diagnostics::new())
    }
}

impl CustomValue for UnsetCustom {
    fn ty(&self) -> AttrType {
        self.ty.clone()
    }

    fn is_null(&self) -> bool {
        !self.unknown
    }

    fn is_unknown(&self) -> bool {
        self.unknown
    }

    fn as_set_valuable(&self) -> Option<&dyn SetValuable> {
        self.set_view.as_ref().map(|view| view as &dyn SetValuable)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            // Custom values carry no comparison hook; only the same instance is equal.
            (Value::Custom(a), Value::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

fn write_state<T>(
    f: &mut fmt::Formatter<'_>,
    state: &ValueState<T>,
    known: impl FnOnce(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    match state {
        ValueState::Null => f.write_str("<null>"),
        ValueState::Unknown => f.write_str("<unknown>"),
        ValueState::Known(value) => known(f, value),
    }
}

fn write_elements(f: &mut fmt::Formatter<'_>, elements: &[Value]) -> fmt::Result {
    f.write_str("[")?;
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{element}")?;
    }
    f.write_str("]")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(state) => write_state(f, state, |f, v| write!(f, "{v}")),
            Value::Int64(state) => write_state(f, state, |f, v| write!(f, "{v}")),
            Value::String(state) => write_state(f, state, |f, v| write!(f, "{v:?}")),
            Value::List(list) => write_state(f, &list.state, |f, v| write_elements(f, v)),
            Value::Set(set) => write_state(f, &set.state, |f, v| write_elements(f, v)),
            Value::Map(map) => write_state(f, &map.state, |f, entries| {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{key:?}:{value}")?;
                }
                f.write_str("}")
            }),
            Value::Custom(custom) if custom.is_null() => f.write_str("<null>"),
            Value::Custom(custom) if custom.is_unknown() => f.write_str("<unknown>"),
            Value::Custom(custom) => write!(f, "{custom:?}"),
        }
    }
}

fn check_element(
    at: impl FnOnce() -> String,
    expected: &AttrType,
    element: &Value,
) -> Result<(), ValueError> {
    let found = element.ty();
    if &found == expected {
        Ok(())
    } else {
        Err(ValueError::ElementType {
            at: at(),
            expected: expected.clone(),
            found,
        })
    }
}

/// An ordered collection value.
#[derive(Debug, Clone, PartialEq)]
pub struct ListValue {
    element_type: AttrType,
    state: ValueState<Vec<Value>>,
}

impl ListValue {
    /// A known list; every element must have `element_type`.
    pub fn new(element_type: AttrType, elements: Vec<Value>) -> Result<Self, ValueError> {
        for (i, element) in elements.iter().enumerate() {
            check_element(|| i.to_string(), &element_type, element)?;
        }
        Ok(Self {
            element_type,
            state: ValueState::Known(elements),
        })
    }

    /// Declared element type.
    pub fn element_type(&self) -> &AttrType {
        &self.element_type
    }

    /// Elements, empty when null or unknown.
    pub fn elements(&self) -> &[Value] {
        self.state.known().map(Vec::as_slice).unwrap_or_default()
    }

    /// Null/unknown/known state.
    pub fn state(&self) -> &ValueState<Vec<Value>> {
        &self.state
    }
}

/// An unordered collection value without duplicates.
///
/// Equality ignores element order.
///
/// # Examples
///
/// ```
/// use attrvalidator::{AttrType, SetValue, Value};
///
/// let set = SetValue::new(
///     AttrType::String,
///     vec![Value::string("x"), Value::string("y"), Value::string("x")],
/// )
/// .unwrap();
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SetValue {
    element_type: AttrType,
    state: ValueState<Vec<Value>>,
}

impl SetValue {
    /// A known set; every element must have `element_type`. Duplicates are dropped.
    pub fn new(element_type: AttrType, elements: Vec<Value>) -> Result<Self, ValueError> {
        let mut unique: Vec<Value> = Vec::with_capacity(elements.len());
        for (i, element) in elements.into_iter().enumerate() {
            check_element(|| i.to_string(), &element_type, &element)?;
            if !unique.contains(&element) {
                unique.push(element);
            }
        }
        Ok(Self {
            element_type,
            state: ValueState::Known(unique),
        })
    }

    /// The null set of `element_type`.
    pub fn null(element_type: AttrType) -> Self {
        Self {
            element_type,
            state: ValueState::Null,
        }
    }

    /// The unknown set of `element_type`.
    pub fn unknown(element_type: AttrType) -> Self {
        Self {
            element_type,
            state: ValueState::Unknown,
        }
    }

    /// Declared element type.
    pub fn element_type(&self) -> &AttrType {
        &self.element_type
    }

    /// Elements, empty when null or unknown.
    pub fn elements(&self) -> &[Value] {
        self.state.known().map(Vec::as_slice).unwrap_or_default()
    }

    /// Null/unknown/known state.
    pub fn state(&self) -> &ValueState<Vec<Value>> {
        &self.state
    }

    /// True when the set is not configured.
    pub fn is_null(&self) -> bool {
        self.state.is_null()
    }

    /// True when the set is only resolvable later.
    pub fn is_unknown(&self) -> bool {
        self.state.is_unknown()
    }

    /// Number of elements; zero when null or unknown.
    pub fn len(&self) -> usize {
        self.elements().len()
    }

    /// True when there are no known elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PartialEq for SetValue {
    fn eq(&self, other: &Self) -> bool {
        if self.element_type != other.element_type {
            return false;
        }
        match (&self.state, &other.state) {
            (ValueState::Null, ValueState::Null) | (ValueState::Unknown, ValueState::Unknown) => {
                true
            }
            (ValueState::Known(a), ValueState::Known(b)) => {
                a.len() == b.len() && a.iter().all(|element| b.contains(element))
            }
            _ => false,
        }
    }
}

impl SetValuable for SetValue {
    fn to_set_value(&self) -> (SetValue, Diagnostics) {
        (self.clone(), Diagnostics::new())
    }
}

/// A string-keyed collection value.
///
/// Entries iterate in key order.
#[derive(Debug, Clone, PartialEq)]
pub struct MapValue {
    element_type: AttrType,
    state: ValueState<BTreeMap<String, Value>>,
}

impl MapValue {
    /// A known map; every entry must have `element_type`.
    pub fn new(
        element_type: AttrType,
        elements: impl IntoIterator<Item = (String, Value)>,
    ) -> Result<Self, ValueError> {
        let elements: BTreeMap<String, Value> = elements.into_iter().collect();
        for (key, element) in &elements {
            check_element(|| format!("{key:?}"), &element_type, element)?;
        }
        Ok(Self {
            element_type,
            state: ValueState::Known(elements),
        })
    }

    /// A known map whose entries are taken as-is, without a type check.
    pub fn new_unchecked(
        element_type: AttrType,
        elements: impl IntoIterator<Item = (String, Value)>,
    ) -> Self {
        Self {
            element_type,
            state: ValueState::Known(elements.into_iter().collect()),
        }
    }

    /// The null map of `element_type`.
    pub fn null(element_type: AttrType) -> Self {
        Self {
            element_type,
            state: ValueState::Null,
        }
    }

    /// The unknown map of `element_type`.
    pub fn unknown(element_type: AttrType) -> Self {
        Self {
            element_type,
            state: ValueState::Unknown,
        }
    }

    /// Declared element type.
    pub fn element_type(&self) -> &AttrType {
        &self.element_type
    }

    /// Entries in key order; empty when null or unknown.
    pub fn elements(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.state
            .known()
            .into_iter()
            .flat_map(|entries| entries.iter().map(|(k, v)| (k.as_str(), v)))
    }

    /// Null/unknown/known state.
    pub fn state(&self) -> &ValueState<BTreeMap<String, Value>> {
        &self.state
    }

    /// True when the map is not configured.
    pub fn is_null(&self) -> bool {
        self.state.is_null()
    }

    /// True when the map is only resolvable later.
    pub fn is_unknown(&self) -> bool {
        self.state.is_unknown()
    }

    /// Number of entries; zero when null or unknown.
    pub fn len(&self) -> usize {
        self.state.known().map_or(0, BTreeMap::len)
    }

    /// True when there are no known entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<Value> {
        items.iter().map(|s| Value::string(*s)).collect()
    }

    #[test]
    fn set_drops_duplicates_and_ignores_order() {
        let a = SetValue::new(AttrType::String, strings(&["x", "y", "x"])).unwrap();
        let b = SetValue::new(AttrType::String, strings(&["y", "x"])).unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(a, b);
    }

    #[test]
    fn set_rejects_mistyped_element() {
        let err = SetValue::new(
            AttrType::String,
            vec![Value::string("x"), Value::int64(1)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValueError::ElementType {
                at: "1".to_string(),
                expected: AttrType::String,
                found: AttrType::Int64,
            }
        );
    }

    #[test]
    fn map_rejects_mistyped_entry() {
        let err = MapValue::new(
            AttrType::set_of(AttrType::String),
            [("a".to_string(), Value::string("x"))],
        )
        .unwrap_err();
        assert!(matches!(err, ValueError::ElementType { ref at, .. } if at == "\"a\""));
    }

    #[test]
    fn map_iterates_in_key_order() {
        let map = MapValue::new(
            AttrType::Int64,
            [
                ("b".to_string(), Value::int64(2)),
                ("a".to_string(), Value::int64(1)),
            ],
        )
        .unwrap();
        let keys: Vec<&str> = map.elements().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn null_and_unknown_follow_the_type() {
        let ty = AttrType::map_of(AttrType::set_of(AttrType::String));
        let null = Value::null(ty.clone());
        let unknown = Value::unknown(ty.clone());
        assert!(null.is_null() && !null.is_unknown());
        assert!(unknown.is_unknown() && !unknown.is_null());
        assert_eq!(null.ty(), ty);
        assert_eq!(unknown.ty(), ty);
    }

    #[derive(Debug)]
    struct LabelsType;

    impl crate::types::CustomType for LabelsType {
        fn name(&self) -> &str {
            "LabelsType"
        }

        fn set_element_type(&self) -> Option<AttrType> {
            Some(AttrType::String)
        }
    }

    #[derive(Debug)]
    struct BlobType;

    impl crate::types::CustomType for BlobType {
        fn name(&self) -> &str {
            "BlobType"
        }
    }

    #[test]
    fn unset_custom_set_types_convert_to_unset_sets() {
        let null = Value::null(AttrType::custom(LabelsType));
        let (set, diags) = null.as_set_valuable().unwrap().to_set_value();
        assert!(set.is_null());
        assert_eq!(set.element_type(), &AttrType::String);
        assert!(diags.is_empty());

        let unknown = Value::unknown(AttrType::custom(LabelsType));
        let (set, diags) = unknown.as_set_valuable().unwrap().to_set_value();
        assert!(set.is_unknown());
        assert!(diags.is_empty());
    }

    #[test]
    fn unset_custom_non_set_types_stay_opaque() {
        let null = Value::null(AttrType::custom(BlobType));
        assert!(null.is_null());
        assert_eq!(
            null.as_set_valuable().err(),
            Some(ConversionError::NotSetValuable {
                found: AttrType::custom(BlobType)
            })
        );
    }

    #[test]
    fn null_map_has_no_entries() {
        let map = MapValue::null(AttrType::String);
        assert_eq!(map.elements().count(), 0);
        assert!(map.is_empty());
    }

    #[test]
    fn sets_are_set_valuable() {
        let value = Value::Set(SetValue::new(AttrType::String, strings(&["x"])).unwrap());
        let (set, diags) = value.as_set_valuable().unwrap().to_set_value();
        assert_eq!(set.len(), 1);
        assert!(diags.is_empty());
    }

    #[test]
    fn lists_are_not_set_valuable() {
        let value = Value::List(ListValue::new(AttrType::String, strings(&["x"])).unwrap());
        let err = value.as_set_valuable().err().unwrap();
        assert_eq!(
            err,
            ConversionError::NotSetValuable {
                found: AttrType::list_of(AttrType::String)
            }
        );
    }

    #[test]
    fn display_renders_nested_values() {
        let set = SetValue::new(AttrType::String, strings(&["x", "y"])).unwrap();
        let map = MapValue::new(
            AttrType::set_of(AttrType::String),
            [
                ("a".to_string(), Value::Set(set)),
                ("b".to_string(), Value::null(AttrType::set_of(AttrType::String))),
            ],
        )
        .unwrap();
        assert_eq!(
            Value::Map(map).to_string(),
            r#"{"a":["x","y"],"b":<null>}"#
        );
    }
}
