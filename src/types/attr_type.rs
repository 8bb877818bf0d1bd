//! Attribute types.

use std::fmt;
use std::sync::Arc;

use super::ConversionError;

/// A provider-defined type layered over the built-in ones.
///
/// Custom types opt into set conversion by returning the element type of the
/// set they convert to from [`CustomType::set_element_type`].
pub trait CustomType: fmt::Debug + Send + Sync {
    /// Stable name, used for display and equality.
    fn name(&self) -> &str;

    /// Element type of the underlying set, if this type is set-typable.
    fn set_element_type(&self) -> Option<AttrType> {
        None
    }
}

/// Declared type of an attribute or of a collection's elements.
#[derive(Debug, Clone)]
pub enum AttrType {
    /// `true` / `false`.
    Bool,
    /// 64-bit signed integer.
    Int64,
    /// UTF-8 string.
    String,
    /// Ordered collection.
    List(Box<AttrType>),
    /// Unordered collection without duplicates.
    Set(Box<AttrType>),
    /// String-keyed collection.
    Map(Box<AttrType>),
    /// Provider-defined type.
    Custom(Arc<dyn CustomType>),
}

impl AttrType {
    /// `List[elem]`.
    pub fn list_of(elem: AttrType) -> Self {
        AttrType::List(Box::new(elem))
    }

    /// `Set[elem]`.
    pub fn set_of(elem: AttrType) -> Self {
        AttrType::Set(Box::new(elem))
    }

    /// `Map[elem]`.
    pub fn map_of(elem: AttrType) -> Self {
        AttrType::Map(Box::new(elem))
    }

    /// Wrap a custom type.
    pub fn custom(ty: impl CustomType + 'static) -> Self {
        AttrType::Custom(Arc::new(ty))
    }

    /// Element type of the set this type converts to.
    ///
    /// # Examples
    ///
    /// ```
    /// use attrvalidator::AttrType;
    ///
    /// let ty = AttrType::set_of(AttrType::String);
    /// assert_eq!(ty.as_set_typable(), Ok(AttrType::String));
    /// assert!(AttrType::String.as_set_typable().is_err());
    /// ```
    pub fn as_set_typable(&self) -> Result<AttrType, ConversionError> {
        match self {
            AttrType::Set(elem) => Ok((**elem).clone()),
            AttrType::Custom(custom) => {
                custom
                    .set_element_type()
                    .ok_or_else(|| ConversionError::NotSetTypable {
                        found: self.clone(),
                    })
            }
            _ => Err(ConversionError::NotSetTypable {
                found: self.clone(),
            }),
        }
    }

    /// True when [`as_set_typable`](Self::as_set_typable) succeeds.
    pub fn is_set_typable(&self) -> bool {
        self.as_set_typable().is_ok()
    }
}

impl PartialEq for AttrType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AttrType::Bool, AttrType::Bool)
            | (AttrType::Int64, AttrType::Int64)
            | (AttrType::String, AttrType::String) => true,
            (AttrType::List(a), AttrType::List(b))
            | (AttrType::Set(a), AttrType::Set(b))
            | (AttrType::Map(a), AttrType::Map(b)) => a == b,
            (AttrType::Custom(a), AttrType::Custom(b)) => a.name() == b.name(),
            _ => false,
        }
    }
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrType::Bool => f.write_str("Bool"),
            AttrType::Int64 => f.write_str("Int64"),
            AttrType::String => f.write_str("String"),
            AttrType::List(elem) => write!(f, "List[{elem}]"),
            AttrType::Set(elem) => write!(f, "Set[{elem}]"),
            AttrType::Map(elem) => write!(f, "Map[{elem}]"),
            AttrType::Custom(custom) => f.write_str(custom.name()),
        }
    }
}
