// ============================================================================
// url-filters - Filter State Stored in a URL Query Parameter
// ============================================================================
//
// A filters collection (names mapped to ordered, duplicate-free values) is
// serialized into one query parameter. Reading the parameter gives a
// snapshot; every operation computes a new collection from the snapshot and
// hands its serialized form to a caller-supplied commit.
// ============================================================================

pub mod codec;
pub mod core;
pub mod mutators;
pub mod provider;
pub mod sync;

#[doc(hidden)]
pub mod macros;

#[doc(hidden)]
pub use serde_json as __serde_json;

// Re-export core items at crate root for ergonomic access
pub use crate::core::constants;
pub use crate::core::error::{CodecError, FiltersError};
pub use crate::core::types::{FilterInput, FilterValue, FilterValues, Filters, SetFilterInput};

// Re-export codecs
pub use codec::{Deserializer, Flatted, JsonCodec, Serializer};

// Re-export mutators
pub use mutators::{
    AddHooks, add_filter_value, add_multiple_filter_values, peek_filter, peek_filter_as,
    remove_filter, remove_filter_value, remove_multiple_filter_values, remove_multiple_filters,
    set_filter_value, set_multiple_filter_values,
};

// Re-export the URL boundary
pub use sync::{
    Commit, CommitCompletion, CommitHooks, DeserializeHooks, async_commit, deserialize_filters,
    sync_state,
};

// Re-export the provider surface
pub use provider::{
    AddFilterValueOptions, DestroyFilterOptions, DestroyFiltersOptions, FiltersContext,
    FiltersProvider, RemoveFilterValueOptions, SearchParams, SetFilterValueOptions, Transaction,
    commit_to,
};

// =============================================================================
// TESTS
// =============================================================================
