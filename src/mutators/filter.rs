// ============================================================================
// url-filters - Filter Mutators
// Whole-filter removal
// ============================================================================

use tracing::trace;

use crate::core::types::Filters;

/// Delete filter `name` and all its values. Missing names are ignored.
pub fn remove_filter<'f>(filters: &'f mut Filters, name: &str) -> &'f mut Filters {
    if filters.remove(name).is_some() {
        trace!(filter = name, "removed filter");
    }
    filters
}

/// Delete every named filter from a copy of `filters`.
///
/// The caller's collection is left untouched.
///
/// # Example
/// ```
/// use url_filters::{filters, mutators::remove_multiple_filters};
///
/// let current = filters! { "color" => ["red", "blue"], "size" => [10] };
/// let updated = remove_multiple_filters(&current, ["size", "isActive"]);
///
/// assert_eq!(updated, filters! { "color" => ["red", "blue"] });
/// assert!(current.contains("size"));
/// ```
pub fn remove_multiple_filters<I>(filters: &Filters, names: I) -> Filters
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut updated = filters.clone();
    for name in names {
        remove_filter(&mut updated, name.as_ref());
    }
    updated
}
