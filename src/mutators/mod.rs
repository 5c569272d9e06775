// ============================================================================
// url-filters - Mutators
// Pure operations over a filters collection
// ============================================================================
//
// Two tiers:
//
// 1. Single-value mutators (`add_filter_value`, `remove_filter_value`,
//    `set_filter_value`, `remove_filter`) edit the collection they are given.
// 2. Batch mutators (`*_multiple_*`) clone once and return a new collection.
// ============================================================================

pub mod batch;
pub mod equality;
pub mod filter;
pub mod peek;
pub mod value;

pub use batch::{
    add_multiple_filter_values, remove_multiple_filter_values, set_multiple_filter_values,
};
pub use equality::{contains, equals, is_structured};
pub use filter::{remove_filter, remove_multiple_filters};
pub use peek::{peek_filter, peek_filter_as};
pub use value::{AddHooks, ValueHook, add_filter_value, remove_filter_value, set_filter_value};
