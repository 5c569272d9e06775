// ============================================================================
// url-filters - Provider
// Read the filters parameter and expose the operations that rewrite it
// ============================================================================

pub mod context;
pub mod search_params;
pub mod store;

pub use context::{
    AddFilterValueOptions, DestroyFilterOptions, DestroyFiltersOptions, FiltersContext,
    RemoveFilterValueOptions, SetFilterValueOptions, Transaction,
};
pub use search_params::{SearchParams, commit_to};
pub use store::{FiltersProvider, FiltersProviderBuilder};
