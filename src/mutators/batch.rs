// ============================================================================
// url-filters - Batch Mutators
// Apply many inputs to one copy of the collection
// ============================================================================
//
// Each batch clones the incoming collection once, then threads that copy
// through every element-level mutation in input order. Later inputs see the
// effects of earlier ones; the caller's collection is never touched.
// ============================================================================

use std::borrow::Borrow;

use tracing::trace;

use super::value::{AddHooks, add_filter_value, remove_filter_value, set_filter_value};
use crate::core::types::{FilterInput, Filters, SetFilterInput};

// =============================================================================
// ADD
// =============================================================================

/// Add every value of every input.
///
/// `hooks` fire around each individual value.
///
/// # Example
/// ```
/// use url_filters::mutators::{add_multiple_filter_values, AddHooks};
/// use url_filters::{filters, FilterInput, Filters};
///
/// let updated = add_multiple_filter_values(
///     &Filters::new(),
///     [FilterInput::one("a", 1), FilterInput::one("a", 2)],
///     &AddHooks::default(),
/// );
/// assert_eq!(updated, filters! { "a" => [1, 2] });
/// ```
pub fn add_multiple_filter_values<I>(filters: &Filters, input: I, hooks: &AddHooks) -> Filters
where
    I: IntoIterator,
    I::Item: Borrow<FilterInput>,
{
    let mut updated = filters.clone();
    for filter_input in input {
        let filter_input: &FilterInput = filter_input.borrow();
        let FilterInput { name, value } = filter_input;
        trace!(filter = name.as_str(), "batch add");
        for item in value.as_slice() {
            add_filter_value(&mut updated, name, item, hooks);
        }
    }
    updated
}

// =============================================================================
// REMOVE
// =============================================================================

/// Remove every value of every input.
pub fn remove_multiple_filter_values<I>(filters: &Filters, input: I) -> Filters
where
    I: IntoIterator,
    I::Item: Borrow<FilterInput>,
{
    let mut updated = filters.clone();
    for filter_input in input {
        let filter_input: &FilterInput = filter_input.borrow();
        let FilterInput { name, value } = filter_input;
        trace!(filter = name.as_str(), "batch remove");
        for item in value.as_slice() {
            remove_filter_value(&mut updated, name, item);
        }
    }
    updated
}

// =============================================================================
// SET
// =============================================================================

/// Replace the values of every named filter; clear-intent inputs remove it.
pub fn set_multiple_filter_values<I>(filters: &Filters, input: I) -> Filters
where
    I: IntoIterator,
    I::Item: Borrow<SetFilterInput>,
{
    let mut updated = filters.clone();
    for filter_input in input {
        let filter_input: &SetFilterInput = filter_input.borrow();
        let SetFilterInput { name, value } = filter_input;
        trace!(filter = name.as_str(), "batch set");
        set_filter_value(&mut updated, name, value.as_ref());
    }
    updated
}

// =============================================================================
// TESTS
// =============================================================================
