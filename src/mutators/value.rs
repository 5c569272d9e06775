// ============================================================================
// url-filters - Filter Value Mutators
// Add, remove and set the values of one filter, in place
// ============================================================================
//
// These mutate the collection they are given and hand the same reference
// back. Callers that must not disturb their own copy go through the batch
// mutators, which clone once up front.
// ============================================================================

use std::fmt;
use std::rc::Rc;

use tracing::trace;

use super::equality::{contains, equals};
use super::filter::remove_filter;
use crate::core::types::{FilterValue, FilterValues, Filters};

// =============================================================================
// HOOKS
// =============================================================================

/// Observer called with the filter name and the value being added.
pub type ValueHook = Rc<dyn Fn(&str, &FilterValue)>;

/// Observers around [`add_filter_value`].
///
/// Both fire exactly once per added value, duplicate or not.
#[derive(Clone, Default)]
pub struct AddHooks {
    /// Fires right before the value is written into the collection.
    pub on_before_add: Option<ValueHook>,
    /// Fires right after the value is written into the collection.
    pub on_after_add: Option<ValueHook>,
}

impl AddHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_before_add(mut self, hook: impl Fn(&str, &FilterValue) + 'static) -> Self {
        self.on_before_add = Some(Rc::new(hook));
        self
    }

    pub fn on_after_add(mut self, hook: impl Fn(&str, &FilterValue) + 'static) -> Self {
        self.on_after_add = Some(Rc::new(hook));
        self
    }
}

impl fmt::Debug for AddHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddHooks")
            .field("on_before_add", &self.on_before_add.is_some())
            .field("on_after_add", &self.on_after_add.is_some())
            .finish()
    }
}

fn notify(hook: &Option<ValueHook>, name: &str, value: &FilterValue) {
    if let Some(hook) = hook {
        hook(name, value);
    }
}

// =============================================================================
// ADD
// =============================================================================

/// Append `value` to the filter `name` unless an equal value is already there.
///
/// # Example
/// ```
/// use serde_json::json;
/// use url_filters::mutators::{add_filter_value, AddHooks};
/// use url_filters::Filters;
///
/// let mut filters = Filters::new();
/// add_filter_value(&mut filters, "color", &json!("red"), &AddHooks::default());
/// add_filter_value(&mut filters, "color", &json!("red"), &AddHooks::default());
///
/// assert_eq!(filters.get("color"), Some(&[json!("red")][..]));
/// ```
pub fn add_filter_value<'f>(
    filters: &'f mut Filters,
    name: &str,
    value: &FilterValue,
    hooks: &AddHooks,
) -> &'f mut Filters {
    let duplicate = filters
        .get(name)
        .is_some_and(|values| contains(values, value));
    trace!(filter = name, duplicate, "adding filter value");

    notify(&hooks.on_before_add, name, value);
    if !duplicate {
        filters.push(name, value.clone());
    }
    notify(&hooks.on_after_add, name, value);

    filters
}

// =============================================================================
// REMOVE
// =============================================================================

/// Drop every value of filter `name` equal to `value`.
///
/// The filter disappears once its last value is gone.
pub fn remove_filter_value<'f>(
    filters: &'f mut Filters,
    name: &str,
    value: &FilterValue,
) -> &'f mut Filters {
    if !filters.contains(name) {
        return filters;
    }

    let emptied = filters.get_mut(name).is_none_or(|values| {
        values.retain(|candidate| !equals(candidate, value));
        values.is_empty()
    });
    trace!(filter = name, emptied, "removed filter value");

    if emptied {
        return remove_filter(filters, name);
    }
    filters
}

// =============================================================================
// SET
// =============================================================================

/// Make `value` the complete content of filter `name`.
///
/// `None`, `null` and an empty sequence remove the filter. Otherwise the
/// filter is cleared and each value is added in order, dropping duplicates.
/// A replaced filter moves to the end of the collection.
pub fn set_filter_value<'f>(
    filters: &'f mut Filters,
    name: &str,
    value: Option<&FilterValues>,
) -> &'f mut Filters {
    let filters = remove_filter(filters, name);

    let Some(value) = value.filter(|value| !value.is_clear()) else {
        trace!(filter = name, "cleared filter");
        return filters;
    };

    let hooks = AddHooks::default();
    for item in value.as_slice() {
        add_filter_value(filters, name, item, &hooks);
    }
    filters
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters;
    use serde_json::json;
    use std::cell::RefCell;

    fn add(filters: &mut Filters, name: &str, value: FilterValue) {
        add_filter_value(filters, name, &value, &AddHooks::default());
    }

    // =========================================================================
    // add_filter_value
    // =========================================================================

    #[test]
    fn add_string_to_existing_filter() {
        let mut filters = filters! { "color" => ["red", "blue"], "size" => [10, 20], "isActive" => [true] };
        add(&mut filters, "color", json!("green"));
        assert_eq!(
            filters,
            filters! { "color" => ["red", "blue", "green"], "size" => [10, 20], "isActive" => [true] }
        );
    }

    #[test]
    fn add_number_and_boolean() {
        let mut filters = filters! { "size" => [10, 20], "isActive" => [true] };
        add(&mut filters, "size", json!(30));
        add(&mut filters, "isActive", json!(false));
        assert_eq!(filters, filters! { "size" => [10, 20, 30], "isActive" => [true, false] });
    }

    #[test]
    fn add_object_creates_filter() {
        let mut filters = filters! { "color" => ["red"] };
        add(&mut filters, "details", json!({ "key": "value" }));
        assert_eq!(
            filters,
            filters! { "color" => ["red"], "details" => [{ "key": "value" }] }
        );
    }

    #[test]
    fn add_to_empty_collection() {
        let mut filters = Filters::new();
        add(&mut filters, "category", json!("Electronics"));
        assert_eq!(filters, filters! { "category" => ["Electronics"] });
    }

    #[test]
    fn add_skips_duplicates() {
        let mut filters = filters! { "color" => ["red"], "details" => [{ "k": 1 }] };
        add(&mut filters, "color", json!("red"));
        add(&mut filters, "details", json!({ "k": 1 }));
        assert_eq!(filters, filters! { "color" => ["red"], "details" => [{ "k": 1 }] });
    }

    #[test]
    fn add_returns_same_collection() {
        let mut filters = Filters::new();
        let returned: *const Filters =
            add_filter_value(&mut filters, "a", &json!(1), &AddHooks::default());
        assert!(std::ptr::eq(returned, &filters));
    }

    #[test]
    fn add_calls_hooks_once_each() {
        let calls: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let before = calls.clone();
        let after = calls.clone();
        let hooks = AddHooks::new()
            .on_before_add(move |name, value| before.borrow_mut().push(format!("before {name}={value}")))
            .on_after_add(move |name, value| after.borrow_mut().push(format!("after {name}={value}")));

        let mut filters = Filters::new();
        add_filter_value(&mut filters, "category", &json!("Electronics"), &hooks);

        assert_eq!(filters, filters! { "category" => ["Electronics"] });
        assert_eq!(
            *calls.borrow(),
            vec![
                "before category=\"Electronics\"".to_string(),
                "after category=\"Electronics\"".to_string()
            ]
        );
    }

    #[test]
    fn add_calls_hooks_for_duplicates() {
        let count = Rc::new(RefCell::new(0));
        let count_clone = count.clone();
        let hooks = AddHooks::new().on_after_add(move |_, _| *count_clone.borrow_mut() += 1);

        let mut filters = filters! { "color" => ["red"] };
        add_filter_value(&mut filters, "color", &json!("red"), &hooks);

        assert_eq!(*count.borrow(), 1);
        assert_eq!(filters, filters! { "color" => ["red"] });
    }

    #[test]
    fn before_hook_sees_collection_unchanged() {
        let mut filters = Filters::new();
        let seen = Rc::new(RefCell::new(None));
        let seen_clone = seen.clone();
        let hooks = AddHooks::new().on_before_add(move |name, value| {
            *seen_clone.borrow_mut() = Some((name.to_string(), value.clone()));
        });

        add_filter_value(&mut filters, "page", &json!(1), &hooks);
        assert_eq!(*seen.borrow(), Some(("page".to_string(), json!(1))));
    }

    // =========================================================================
    // remove_filter_value
    // =========================================================================

    #[test]
    fn remove_string_number_boolean() {
        let mut filters = filters! { "color" => ["red", "blue", "green"], "size" => [10, 20, 30], "isActive" => [true, false] };
        remove_filter_value(&mut filters, "color", &json!("green"));
        remove_filter_value(&mut filters, "size", &json!(30));
        remove_filter_value(&mut filters, "isActive", &json!(false));
        assert_eq!(
            filters,
            filters! { "color" => ["red", "blue"], "size" => [10, 20], "isActive" => [true] }
        );
    }

    #[test]
    fn remove_object_drops_emptied_filter() {
        let mut filters = filters! { "color" => ["red", "blue"], "details" => [{ "key": "value" }] };
        remove_filter_value(&mut filters, "details", &json!({ "key": "value" }));
        assert_eq!(filters, filters! { "color" => ["red", "blue"] });
    }

    #[test]
    fn remove_last_value_drops_filter() {
        let mut filters = filters! { "color" => ["green"], "size" => [10, 20] };
        remove_filter_value(&mut filters, "color", &json!("green"));
        assert!(!filters.contains("color"));
        assert_eq!(filters, filters! { "size" => [10, 20] });
    }

    #[test]
    fn remove_missing_filter_is_noop() {
        let mut filters = filters! { "color" => ["red", "blue"] };
        remove_filter_value(&mut filters, "brand", &json!("Nike"));
        assert_eq!(filters, filters! { "color" => ["red", "blue"] });

        let mut empty = Filters::new();
        remove_filter_value(&mut empty, "category", &json!("Electronics"));
        assert!(empty.is_empty());
    }

    #[test]
    fn remove_missing_value_is_noop() {
        let mut filters = filters! { "color" => ["red"] };
        remove_filter_value(&mut filters, "color", &json!("blue"));
        assert_eq!(filters, filters! { "color" => ["red"] });
    }

    #[test]
    fn remove_object_keeps_its_encoded_string() {
        let object = json!({ "k": 1 });
        let encoded = json!(crate::codec::canonical(&object));
        let mut filters = Filters::new();
        filters.insert("x", vec![encoded.clone(), json!("keep"), object.clone()]);

        remove_filter_value(&mut filters, "x", &object);

        assert_eq!(filters.get("x"), Some(&[encoded, json!("keep")][..]));
    }

    // =========================================================================
    // set_filter_value
    // =========================================================================

    #[test]
    fn set_replaces_values() {
        let mut filters = filters! { "color" => ["red", "blue"] };
        let value = FilterValues::many(["red", "blue", "green"]);
        set_filter_value(&mut filters, "color", Some(&value));
        assert_eq!(filters, filters! { "color" => ["red", "blue", "green"] });
    }

    #[test]
    fn set_same_values_does_not_duplicate() {
        let mut filters = filters! { "color" => ["red", "blue"] };
        let value = FilterValues::many(["red", "blue"]);
        set_filter_value(&mut filters, "color", Some(&value));
        assert_eq!(filters, filters! { "color" => ["red", "blue"] });
    }

    #[test]
    fn set_dedupes_its_own_input() {
        let mut filters = Filters::new();
        let value = FilterValues::Many(vec![json!({ "k": 1 }), json!({ "k": 1 }), json!(2)]);
        set_filter_value(&mut filters, "x", Some(&value));
        assert_eq!(filters, filters! { "x" => [{ "k": 1 }, 2] });
    }

    #[test]
    fn set_single_value() {
        let mut filters = filters! { "page" => [3] };
        set_filter_value(&mut filters, "page", Some(&FilterValues::one(1)));
        assert_eq!(filters, filters! { "page" => [1] });
    }

    #[test]
    fn set_clear_intents_remove_filter() {
        for value in [
            None,
            Some(FilterValues::One(json!(null))),
            Some(FilterValues::Many(vec![])),
        ] {
            let mut filters = filters! { "color" => ["red"], "size" => [10] };
            set_filter_value(&mut filters, "color", value.as_ref());
            assert_eq!(filters, filters! { "size" => [10] });
        }
    }

    #[test]
    fn set_keeps_falsy_primitives() {
        let mut filters = Filters::new();
        set_filter_value(&mut filters, "page", Some(&FilterValues::one(0)));
        set_filter_value(&mut filters, "isActive", Some(&FilterValues::one(false)));
        set_filter_value(&mut filters, "search", Some(&FilterValues::one("")));
        assert_eq!(
            filters,
            filters! { "page" => [0], "isActive" => [false], "search" => [""] }
        );
    }

    #[test]
    fn set_moves_filter_to_the_end() {
        let mut filters = filters! { "a" => [1], "b" => [2] };
        set_filter_value(&mut filters, "a", Some(&FilterValues::one(3)));
        let names: Vec<_> = filters.names().collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
