// ============================================================================
// url-filters - Equality
// Decides whether two filter values are the same value
// ============================================================================

use serde_json::{Number, Value};

use crate::codec::canonical;
use crate::core::types::FilterValue;

// =============================================================================
// STRUCTURED VS PRIMITIVE
// =============================================================================

/// Objects and arrays are structured; everything else is a primitive.
pub fn is_structured(value: &FilterValue) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

// =============================================================================
// EQUALS
// =============================================================================

/// Content equality for filter values.
///
/// When either side is structured both sides are compared through their
/// canonical encoding, so a structured value never equals a primitive and two
/// objects are equal when they encode to the same text (same keys, same key
/// order, same values). Primitives compare directly; numbers compare by
/// numeric value.
///
/// Both sides of a mixed pair are encoded, not just the structured one. A
/// primitive string holding an object's encoded text is therefore a
/// different value from that object, and `remove_filter_value` with the
/// object leaves such a string in place.
///
/// # Example
/// ```
/// use serde_json::json;
/// use url_filters::mutators::equals;
///
/// assert!(equals(&json!("red"), &json!("red")));
/// assert!(equals(&json!(10), &json!(10.0)));
/// assert!(equals(&json!({ "k": 1 }), &json!({ "k": 1 })));
/// assert!(!equals(&json!({ "k": 1 }), &json!("k")));
/// ```
pub fn equals(a: &FilterValue, b: &FilterValue) -> bool {
    if is_structured(a) || is_structured(b) {
        return canonical(a) == canonical(b);
    }
    primitive_equals(a, b)
}

fn primitive_equals(a: &FilterValue, b: &FilterValue) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        _ => a == b,
    }
}

fn numbers_equal(x: &Number, y: &Number) -> bool {
    if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
        return x == y;
    }
    x.as_f64() == y.as_f64()
}

/// Returns true if `values` holds a value equal to `value`.
pub fn contains(values: &[FilterValue], value: &FilterValue) -> bool {
    if is_structured(value) {
        // Encode the needle once instead of once per comparison.
        let needle = canonical(value);
        return values
            .iter()
            .any(|candidate| is_structured(candidate) && canonical(candidate) == needle);
    }
    values
        .iter()
        .any(|candidate| !is_structured(candidate) && primitive_equals(candidate, value))
}

// =============================================================================
// TESTS
// =============================================================================
