// ============================================================================
// url-filters - Peek
// Read the values of one filter
// ============================================================================

use serde::de::DeserializeOwned;

use crate::core::error::FiltersError;
use crate::core::types::{FilterValue, Filters};

/// Values of filter `name`, or an empty slice when it is not set.
///
/// # Example
/// ```
/// use url_filters::{filters, mutators::peek_filter};
///
/// let filters = filters! { "page" => [2] };
/// assert_eq!(peek_filter(&filters, "page").len(), 1);
/// assert!(peek_filter(&filters, "missing").is_empty());
/// ```
pub fn peek_filter<'f>(filters: &'f Filters, name: &str) -> &'f [FilterValue] {
    filters.get(name).unwrap_or(&[])
}

/// Values of filter `name` read as `T`.
pub fn peek_filter_as<T>(filters: &Filters, name: &str) -> Result<Vec<T>, FiltersError>
where
    T: DeserializeOwned,
{
    peek_filter(filters, name)
        .iter()
        .map(|value| {
            T::deserialize(value).map_err(|source| FiltersError::ValueType {
                name: name.to_string(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters;
    use serde_json::json;

    #[test]
    fn peek_existing_filter() {
        let filters = filters! { "color" => ["red", "blue"] };
        assert_eq!(peek_filter(&filters, "color"), &[json!("red"), json!("blue")]);
    }

    #[test]
    fn peek_missing_filter() {
        assert!(peek_filter(&Filters::new(), "missing").is_empty());
    }

    #[test]
    fn peek_typed() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Range {
            min: u32,
            max: u32,
        }

        let filters = filters! { "page" => [2], "price" => [{ "min": 10, "max": 20 }] };

        let pages: Vec<u32> = peek_filter_as(&filters, "page").unwrap();
        assert_eq!(pages, vec![2]);

        let ranges: Vec<Range> = peek_filter_as(&filters, "price").unwrap();
        assert_eq!(ranges, vec![Range { min: 10, max: 20 }]);

        let missing: Vec<String> = peek_filter_as(&filters, "search").unwrap();
        assert!(missing.is_empty());
    }

    #[test]
    fn peek_typed_reports_mismatch() {
        let filters = filters! { "page" => ["two"] };
        let err = peek_filter_as::<u32>(&filters, "page").unwrap_err();
        assert!(matches!(err, FiltersError::ValueType { ref name, .. } if name == "page"));
    }
}
