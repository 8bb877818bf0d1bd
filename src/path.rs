//! Structural paths into a configuration tree
//!
//! A [`Path`] points at exactly one value: an attribute, then any number of
//! element steps (map keys, list indices, set values). A [`PathExpression`]
//! has the same shape but may contain wildcards, so it can describe a whole
//! family of paths. Validators receive both: the concrete path for reporting
//! and the expression for relative lookups.
//!
//! # Examples
//!
//! ```
//! use attrvalidator::Path;
//!
//! let path = Path::root("network").at_name("tags").at_map_key("env");
//! assert_eq!(path.to_string(), r#"network.tags["env"]"#);
//! assert!(path.expression().matches(&path));
//! ```

use std::fmt;

use crate::types::Value;

/// One step of a [`Path`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathStep {
    /// Attribute (or block) name.
    AttributeName(String),
    /// Map entry by key.
    ElementKeyString(String),
    /// List element by index.
    ElementKeyInt(i64),
    /// Set element, addressed by its own value.
    ///
    /// Serializes as the value's display text. Deserializing this step is
    /// not supported.
    #[cfg_attr(
        feature = "serde",
        serde(serialize_with = "serialize_display", skip_deserializing)
    )]
    ElementKeyValue(Value),
}

#[cfg(feature = "serde")]
fn serialize_display<S>(value: &Value, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(value)
}

impl PathStep {
    fn write_to(&self, f: &mut fmt::Formatter<'_>, first: bool) -> fmt::Result {
        match self {
            PathStep::AttributeName(name) if first => write!(f, "{name}"),
            PathStep::AttributeName(name) => write!(f, ".{name}"),
            PathStep::ElementKeyString(key) => write!(f, "[{key:?}]"),
            PathStep::ElementKeyInt(index) => write!(f, "[{index}]"),
            PathStep::ElementKeyValue(value) => write!(f, "[Value({value})]"),
        }
    }
}

/// Location of a single value inside a configuration.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    steps: Vec<PathStep>,
}

impl Path {
    /// The empty path, pointing at the configuration itself.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A path starting at a top-level attribute.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            steps: vec![PathStep::AttributeName(name.into())],
        }
    }

    /// Append an attribute name step.
    pub fn at_name(&self, name: impl Into<String>) -> Self {
        self.with_step(PathStep::AttributeName(name.into()))
    }

    /// Append a map key step.
    pub fn at_map_key(&self, key: impl Into<String>) -> Self {
        self.with_step(PathStep::ElementKeyString(key.into()))
    }

    /// Append a list index step.
    pub fn at_list_index(&self, index: i64) -> Self {
        self.with_step(PathStep::ElementKeyInt(index))
    }

    /// Append a set value step.
    pub fn at_set_value(&self, value: Value) -> Self {
        self.with_step(PathStep::ElementKeyValue(value))
    }

    /// The path one step up, or `None` for the empty path.
    pub fn parent(&self) -> Option<Path> {
        let (_, rest) = self.steps.split_last()?;
        Some(Path {
            steps: rest.to_vec(),
        })
    }

    /// Steps from the root outwards.
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Last step, if any.
    pub fn last_step(&self) -> Option<&PathStep> {
        self.steps.last()
    }

    /// True for the empty path.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The exact expression matching only this path.
    pub fn expression(&self) -> PathExpression {
        PathExpression {
            steps: self
                .steps
                .iter()
                .cloned()
                .map(ExpressionStep::Exact)
                .collect(),
        }
    }

    fn with_step(&self, step: PathStep) -> Self {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend_from_slice(&self.steps);
        steps.push(step);
        Self { steps }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            step.write_to(f, i == 0)?;
        }
        Ok(())
    }
}

/// One step of a [`PathExpression`].
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionStep {
    /// Matches exactly this step.
    Exact(PathStep),
    /// Matches any map key.
    AnyMapKey,
    /// Matches any list index.
    AnyListIndex,
    /// Matches any set value.
    AnySetValue,
}

impl ExpressionStep {
    fn matches(&self, step: &PathStep) -> bool {
        match (self, step) {
            (ExpressionStep::Exact(expected), actual) => expected == actual,
            (ExpressionStep::AnyMapKey, PathStep::ElementKeyString(_)) => true,
            (ExpressionStep::AnyListIndex, PathStep::ElementKeyInt(_)) => true,
            (ExpressionStep::AnySetValue, PathStep::ElementKeyValue(_)) => true,
            _ => false,
        }
    }
}

/// A path that may contain wildcard steps.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathExpression {
    steps: Vec<ExpressionStep>,
}

impl PathExpression {
    /// Append an exact attribute name step.
    pub fn at_name(mut self, name: impl Into<String>) -> Self {
        self.steps
            .push(ExpressionStep::Exact(PathStep::AttributeName(name.into())));
        self
    }

    /// Append an exact map key step.
    pub fn at_map_key(mut self, key: impl Into<String>) -> Self {
        self.steps
            .push(ExpressionStep::Exact(PathStep::ElementKeyString(key.into())));
        self
    }

    /// Append a wildcard matching every map key.
    pub fn at_any_map_key(mut self) -> Self {
        self.steps.push(ExpressionStep::AnyMapKey);
        self
    }

    /// Append a wildcard matching every list index.
    pub fn at_any_list_index(mut self) -> Self {
        self.steps.push(ExpressionStep::AnyListIndex);
        self
    }

    /// Append a wildcard matching every set value.
    pub fn at_any_set_value(mut self) -> Self {
        self.steps.push(ExpressionStep::AnySetValue);
        self
    }

    /// Steps from the root outwards.
    pub fn steps(&self) -> &[ExpressionStep] {
        &self.steps
    }

    /// True when `path` has the same length and every step matches.
    pub fn matches(&self, path: &Path) -> bool {
        self.steps.len() == path.steps.len()
            && self
                .steps
                .iter()
                .zip(&path.steps)
                .all(|(expr, step)| expr.matches(step))
    }
}

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                ExpressionStep::Exact(step) => step.write_to(f, i == 0)?,
                ExpressionStep::AnyMapKey
                | ExpressionStep::AnyListIndex
                | ExpressionStep::AnySetValue => f.write_str("[*]")?,
            }
        }
        Ok(())
    }
}
