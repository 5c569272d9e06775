// ============================================================================
// url-filters - Commit
// Push a filters collection back into the URL through a caller-supplied sink
// ============================================================================
//
// The store never touches the URL itself. A commit receives the serialized
// collection (or nothing, when the collection is empty and the parameter
// should disappear) and may finish asynchronously. `sync_state` performs the
// synchronous half right away, including the after-hook when the commit has
// already finished, and returns a future for the rest.
// ============================================================================

use std::fmt;
use std::future::Future;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};
use tracing::debug;

use crate::codec::Serializer;
use crate::core::types::Filters;

// =============================================================================
// COMMIT CAPABILITY
// =============================================================================

/// Future resolving once a commit and its after-hook have run.
pub type CommitCompletion = LocalBoxFuture<'static, ()>;

/// Sink for the serialized URL parameter value.
///
/// `None` asks for the parameter to be removed.
pub trait Commit {
    fn commit(&self, serialized: Option<String>) -> LocalBoxFuture<'static, ()>;
}

/// Plain closures commit synchronously.
impl<F> Commit for F
where
    F: Fn(Option<String>),
{
    fn commit(&self, serialized: Option<String>) -> LocalBoxFuture<'static, ()> {
        self(serialized);
        future::ready(()).boxed_local()
    }
}

/// Commit backed by a closure that returns a future.
///
/// Build one with [`async_commit`].
pub struct AsyncCommit<F> {
    f: F,
}

/// Wrap a future-returning closure as a [`Commit`].
///
/// # Example
/// ```
/// use url_filters::sync::{async_commit, Commit};
///
/// let commit = async_commit(|serialized: Option<String>| async move {
///     assert_eq!(serialized.as_deref(), Some("[{}]"));
/// });
/// futures::executor::block_on(commit.commit(Some("[{}]".to_string())));
/// ```
pub fn async_commit<F, Fut>(f: F) -> AsyncCommit<F>
where
    F: Fn(Option<String>) -> Fut,
    Fut: Future<Output = ()> + 'static,
{
    AsyncCommit { f }
}

impl<F, Fut> Commit for AsyncCommit<F>
where
    F: Fn(Option<String>) -> Fut,
    Fut: Future<Output = ()> + 'static,
{
    fn commit(&self, serialized: Option<String>) -> LocalBoxFuture<'static, ()> {
        (self.f)(serialized).boxed_local()
    }
}

impl<F> fmt::Debug for AsyncCommit<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncCommit").finish_non_exhaustive()
    }
}

/// Shared handle to a commit sink.
pub type CommitFn = Rc<dyn Commit>;

// =============================================================================
// HOOKS
// =============================================================================

/// Observer called with the collection being committed.
pub type FiltersHook = Rc<dyn Fn(&Filters)>;

/// Observers around [`sync_state`].
#[derive(Clone, Default)]
pub struct CommitHooks {
    /// Fires before serialization.
    pub on_before_commit: Option<FiltersHook>,
    /// Fires once the commit has completed.
    pub on_after_commit: Option<FiltersHook>,
}

impl CommitHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_before_commit(mut self, hook: impl Fn(&Filters) + 'static) -> Self {
        self.on_before_commit = Some(Rc::new(hook));
        self
    }

    pub fn on_after_commit(mut self, hook: impl Fn(&Filters) + 'static) -> Self {
        self.on_after_commit = Some(Rc::new(hook));
        self
    }
}

impl fmt::Debug for CommitHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommitHooks")
            .field("on_before_commit", &self.on_before_commit.is_some())
            .field("on_after_commit", &self.on_after_commit.is_some())
            .finish()
    }
}

// =============================================================================
// SYNC
// =============================================================================

/// Serialize `filters` and hand the result to `commit`.
///
/// The before-hook, serialization and the call into `commit` happen before
/// this returns. The commit's future is polled once: when it is already done
/// the after-hook fires immediately and the returned future is ready, so a
/// synchronous commit never depends on the caller awaiting. Otherwise the
/// returned future waits for the commit to finish and then fires the
/// after-hook.
///
/// An empty collection commits `None` so the parameter is removed.
pub fn sync_state<S>(
    filters: Filters,
    commit: &dyn Commit,
    serializer: &S,
    hooks: &CommitHooks,
) -> CommitCompletion
where
    S: Serializer + ?Sized,
{
    if let Some(hook) = &hooks.on_before_commit {
        hook(&filters);
    }

    let serialized = if filters.is_empty() {
        None
    } else {
        Some(serializer.serialize(&filters))
    };
    debug!(
        filters = filters.len(),
        bytes = serialized.as_ref().map_or(0, String::len),
        "committing filters"
    );

    let mut pending = commit.commit(serialized);
    let after = hooks.on_after_commit.clone();

    if pending.as_mut().now_or_never().is_some() {
        if let Some(hook) = after {
            hook(&filters);
        }
        return future::ready(()).boxed_local();
    }

    async move {
        pending.await;
        if let Some(hook) = after {
            hook(&filters);
        }
    }
    .boxed_local()
}
