// ============================================================================
// url-filters - URL Synchronization
// The two boundaries between the URL parameter and a filters collection
// ============================================================================

pub mod commit;
pub mod deserialize;

pub use commit::{
    AsyncCommit, Commit, CommitCompletion, CommitFn, CommitHooks, FiltersHook, async_commit,
    sync_state,
};
pub use deserialize::{DeserializeHooks, NotifyFn, deserialize_filters};
