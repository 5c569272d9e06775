// ============================================================================
// url-filters - Ergonomic Macros
// ============================================================================

use serde_json::Value;

use crate::core::types::FilterValue;

/// Build a [`Filters`](crate::Filters) collection from JSON-like literals.
///
/// Each name maps to an array of values; a bare value is a single-value
/// filter. Empty arrays leave the name out.
///
/// # Usage
///
/// ```rust
/// use url_filters::filters;
///
/// let filters = filters! {
///     "color" => ["red", "blue"],
///     "page" => 2,
///     "price" => [{ "min": 10, "max": 20 }],
///     "empty" => [],
/// };
///
/// assert_eq!(filters.len(), 3);
/// assert_eq!(filters.get("page").map(<[_]>::len), Some(1));
/// ```
#[macro_export]
macro_rules! filters {
    () => {
        $crate::Filters::new()
    };
    ($($name:expr => $values:tt),+ $(,)?) => {{
        let mut filters = $crate::Filters::new();
        $(
            filters.insert(
                $name,
                $crate::macros::json_values($crate::__serde_json::json!($values)),
            );
        )+
        filters
    }};
}

/// Values of a `filters!` entry: an array spreads, anything else is one value.
#[doc(hidden)]
pub fn json_values(value: Value) -> Vec<FilterValue> {
    match value {
        Value::Array(values) => values,
        value => vec![value],
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    #[test]
    fn empty_invocation() {
        assert!(filters!().is_empty());
    }

    #[test]
    fn arrays_spread_and_scalars_wrap() {
        let filters = filters! { "color" => ["red", "blue"], "page" => 2, "flag" => true };
        assert_eq!(filters.get("color"), Some(&[json!("red"), json!("blue")][..]));
        assert_eq!(filters.get("page"), Some(&[json!(2)][..]));
        assert_eq!(filters.get("flag"), Some(&[json!(true)][..]));
    }

    #[test]
    fn nested_arrays_stay_values() {
        let filters = filters! { "range" => [[1, 5]] };
        assert_eq!(filters.get("range"), Some(&[json!([1, 5])][..]));
    }

    #[test]
    fn names_keep_order() {
        let filters = filters! { "b" => [1], "a" => [2], "empty" => [] };
        let names: Vec<_> = filters.names().collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
