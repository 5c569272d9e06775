// ============================================================================
// url-filters - Type Definitions
// Filter values, the filters collection and the inputs that mutate it
// ============================================================================

use std::slice;

use indexmap::IndexMap;
use indexmap::map::Iter;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::error::CodecError;

// =============================================================================
// FILTER VALUE
// =============================================================================

/// A single selected value of a filter.
///
/// Strings, numbers and booleans are primitives. Objects and arrays are
/// structured values and are compared through their canonical encoding (see
/// [`equals`](crate::mutators::equals)).
pub type FilterValue = Value;

// =============================================================================
// FILTERS
// =============================================================================

/// Filter names mapped to their selected values.
///
/// Names keep their insertion order, and so do the values under each name. A
/// name never maps to an empty sequence: inserting an empty sequence removes
/// the name instead.
///
/// Equality compares names as a map (order-insensitive) and values as
/// sequences (order-sensitive).
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use url_filters::Filters;
///
/// let mut filters = Filters::new();
/// filters.insert("color", vec![json!("red"), json!("blue")]);
/// filters.insert("size", vec![]);
///
/// assert_eq!(filters.len(), 1);
/// assert_eq!(filters.get("color").map(<[_]>::len), Some(2));
/// assert!(!filters.contains("size"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Filters {
    inner: IndexMap<String, Vec<FilterValue>>,
}

impl Filters {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of filter names present.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if no filter holds a value.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns true if `name` holds at least one value.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    /// Values stored under `name`.
    pub fn get(&self, name: &str) -> Option<&[FilterValue]> {
        self.inner.get(name).map(Vec::as_slice)
    }

    /// Replace the values stored under `name`.
    ///
    /// An existing name keeps its position; a new name goes last. An empty
    /// sequence removes the name.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<FilterValue>) {
        let name = name.into();
        if values.is_empty() {
            self.inner.shift_remove(&name);
        } else {
            self.inner.insert(name, values);
        }
    }

    /// Remove `name` and return its values. Remaining names keep their order.
    pub fn remove(&mut self, name: &str) -> Option<Vec<FilterValue>> {
        self.inner.shift_remove(name)
    }

    /// Filter names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    /// Iterate over `(name, values)` pairs in insertion order.
    pub fn iter(&self) -> Iter<'_, String, Vec<FilterValue>> {
        self.inner.iter()
    }

    /// Append a value without any duplicate check.
    pub(crate) fn push(&mut self, name: &str, value: FilterValue) {
        match self.inner.get_mut(name) {
            Some(values) => values.push(value),
            None => {
                self.inner.insert(name.to_string(), vec![value]);
            }
        }
    }

    /// Mutable access for in-place edits. Callers must not leave the
    /// sequence empty.
    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Vec<FilterValue>> {
        self.inner.get_mut(name)
    }

    // =========================================================================
    // VALUE CONVERSION
    // =========================================================================

    /// The collection as a JSON object of arrays.
    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .inner
            .iter()
            .map(|(name, values)| (name.clone(), Value::Array(values.clone())))
            .collect();
        Value::Object(map)
    }

    /// Build a collection from a JSON object of arrays.
    ///
    /// Names holding an empty array are dropped.
    pub fn from_value(value: Value) -> Result<Self, CodecError> {
        let Value::Object(map) = value else {
            return Err(CodecError::UnexpectedShape(format!(
                "expected an object of filters, found {}",
                describe(&value)
            )));
        };

        let mut filters = Filters::new();
        for (name, values) in map {
            match values {
                Value::Array(values) => filters.insert(name, values),
                other => {
                    return Err(CodecError::UnexpectedShape(format!(
                        "filter `{name}` must hold an array, found {}",
                        describe(&other)
                    )));
                }
            }
        }
        Ok(filters)
    }
}

impl FromIterator<(String, Vec<FilterValue>)> for Filters {
    fn from_iter<I: IntoIterator<Item = (String, Vec<FilterValue>)>>(iter: I) -> Self {
        let mut filters = Filters::new();
        for (name, values) in iter {
            filters.insert(name, values);
        }
        filters
    }
}

/// Empty arrays are dropped, as with [`Filters::from_value`].
impl<'de> Deserialize<'de> for Filters {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner = IndexMap::<String, Vec<FilterValue>>::deserialize(deserializer)?;
        Ok(inner.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Filters {
    type Item = (&'a String, &'a Vec<FilterValue>);
    type IntoIter = Iter<'a, String, Vec<FilterValue>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// =============================================================================
// INPUTS
// =============================================================================

/// One value or a sequence of values destined for a single filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValues {
    One(FilterValue),
    Many(Vec<FilterValue>),
}

impl FilterValues {
    /// A single value.
    pub fn one(value: impl Into<FilterValue>) -> Self {
        FilterValues::One(value.into())
    }

    /// A sequence of values, kept in the given order.
    pub fn many<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FilterValue>,
    {
        FilterValues::Many(values.into_iter().map(Into::into).collect())
    }

    /// The values as a slice; a single value is a slice of one.
    pub fn as_slice(&self) -> &[FilterValue] {
        match self {
            FilterValues::One(value) => slice::from_ref(value),
            FilterValues::Many(values) => values,
        }
    }

    /// `null` or an empty sequence: the intent to clear a filter.
    pub fn is_clear(&self) -> bool {
        match self {
            FilterValues::One(value) => value.is_null(),
            FilterValues::Many(values) => values.is_empty(),
        }
    }
}

impl From<FilterValue> for FilterValues {
    fn from(value: FilterValue) -> Self {
        FilterValues::One(value)
    }
}

impl From<Vec<FilterValue>> for FilterValues {
    fn from(values: Vec<FilterValue>) -> Self {
        FilterValues::Many(values)
    }
}

/// A filter name paired with the value(s) to add or remove.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterInput {
    pub name: String,
    pub value: FilterValues,
}

impl FilterInput {
    pub fn new(name: impl Into<String>, value: impl Into<FilterValues>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Input carrying a single value.
    pub fn one(name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(name, FilterValues::one(value))
    }

    /// Input carrying several values.
    pub fn many<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FilterValue>,
    {
        Self::new(name, FilterValues::many(values))
    }
}

/// A filter name paired with the value(s) it should hold from now on.
///
/// `None`, `One(null)` and an empty `Many` all clear the filter.
#[derive(Debug, Clone, PartialEq)]
pub struct SetFilterInput {
    pub name: String,
    pub value: Option<FilterValues>,
}

impl SetFilterInput {
    pub fn new(name: impl Into<String>, value: Option<FilterValues>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn one(name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(name, Some(FilterValues::one(value)))
    }

    pub fn many<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FilterValue>,
    {
        Self::new(name, Some(FilterValues::many(values)))
    }

    /// Input that clears `name`.
    pub fn clear(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }

    /// Returns true if applying this input removes the filter.
    pub fn is_clear(&self) -> bool {
        self.value.as_ref().is_none_or(FilterValues::is_clear)
    }
}

impl From<FilterInput> for SetFilterInput {
    fn from(input: FilterInput) -> Self {
        Self::new(input.name, Some(input.value))
    }
}

// =============================================================================
// TESTS
// =============================================================================
