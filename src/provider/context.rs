// ============================================================================
// url-filters - Filters Context
// A snapshot of the URL parameter plus the operations that rewrite it
// ============================================================================
//
// A context never changes after it is read. Every mutating operation computes
// a new collection from the snapshot, commits it, and leaves re-reading the
// URL to the caller. Each operation resolves its commit (per-call override,
// else the provider default) before touching anything.
// ============================================================================

use std::fmt;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use tracing::trace;

use crate::core::error::FiltersError;
use crate::core::types::{FilterInput, FilterValue, Filters, SetFilterInput};
use crate::mutators::{
    AddHooks, add_multiple_filter_values, peek_filter, peek_filter_as,
    remove_multiple_filter_values, remove_multiple_filters, set_multiple_filter_values,
};
use crate::sync::{Commit, CommitCompletion, CommitFn, CommitHooks, sync_state};

use super::store::FiltersProvider;

// =============================================================================
// TRANSACTION
// =============================================================================

/// Per-call commit override and commit hooks.
#[derive(Clone, Default)]
pub struct Transaction {
    /// Replaces the provider's default commit for this call.
    pub commit: Option<CommitFn>,
    pub hooks: CommitHooks,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commit(mut self, commit: impl Commit + 'static) -> Self {
        self.commit = Some(Rc::new(commit));
        self
    }

    pub fn on_before_commit(mut self, hook: impl Fn(&Filters) + 'static) -> Self {
        self.hooks = self.hooks.on_before_commit(hook);
        self
    }

    pub fn on_after_commit(mut self, hook: impl Fn(&Filters) + 'static) -> Self {
        self.hooks = self.hooks.on_after_commit(hook);
        self
    }
}

impl fmt::Debug for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transaction")
            .field("commit", &self.commit.is_some())
            .field("hooks", &self.hooks)
            .finish()
    }
}

// =============================================================================
// OPERATION OPTIONS
// =============================================================================

/// Adds the transaction shorthands shared by every options type.
macro_rules! transaction_options {
    ($($options:ty),+ $(,)?) => {
        $(
            impl $options {
                /// Replace the whole transaction.
                pub fn transaction(mut self, transaction: Transaction) -> Self {
                    self.transaction = transaction;
                    self
                }

                /// Commit this call through `commit` instead of the provider default.
                pub fn commit(mut self, commit: impl Commit + 'static) -> Self {
                    self.transaction = self.transaction.commit(commit);
                    self
                }

                pub fn on_before_commit(mut self, hook: impl Fn(&Filters) + 'static) -> Self {
                    self.transaction = self.transaction.on_before_commit(hook);
                    self
                }

                pub fn on_after_commit(mut self, hook: impl Fn(&Filters) + 'static) -> Self {
                    self.transaction = self.transaction.on_after_commit(hook);
                    self
                }
            }
        )+
    };
}

/// Options for [`FiltersContext::add_filter_value`].
#[derive(Debug, Clone, Default)]
pub struct AddFilterValueOptions {
    pub input: Vec<FilterInput>,
    pub hooks: AddHooks,
    pub transaction: Transaction,
}

impl AddFilterValueOptions {
    pub fn new(input: impl IntoIterator<Item = FilterInput>) -> Self {
        Self {
            input: input.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn on_before_add(mut self, hook: impl Fn(&str, &FilterValue) + 'static) -> Self {
        self.hooks = self.hooks.on_before_add(hook);
        self
    }

    pub fn on_after_add(mut self, hook: impl Fn(&str, &FilterValue) + 'static) -> Self {
        self.hooks = self.hooks.on_after_add(hook);
        self
    }
}

impl From<FilterInput> for AddFilterValueOptions {
    fn from(input: FilterInput) -> Self {
        Self::new([input])
    }
}

/// Options for [`FiltersContext::remove_filter_value`].
#[derive(Debug, Clone, Default)]
pub struct RemoveFilterValueOptions {
    pub input: Vec<FilterInput>,
    pub transaction: Transaction,
}

impl RemoveFilterValueOptions {
    pub fn new(input: impl IntoIterator<Item = FilterInput>) -> Self {
        Self {
            input: input.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl From<FilterInput> for RemoveFilterValueOptions {
    fn from(input: FilterInput) -> Self {
        Self::new([input])
    }
}

/// Options for [`FiltersContext::set_filter_value`].
#[derive(Debug, Clone, Default)]
pub struct SetFilterValueOptions {
    pub input: Vec<SetFilterInput>,
    pub transaction: Transaction,
}

impl SetFilterValueOptions {
    pub fn new(input: impl IntoIterator<Item = SetFilterInput>) -> Self {
        Self {
            input: input.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl From<SetFilterInput> for SetFilterValueOptions {
    fn from(input: SetFilterInput) -> Self {
        Self::new([input])
    }
}

/// Options for [`FiltersContext::destroy_filter`].
#[derive(Debug, Clone, Default)]
pub struct DestroyFilterOptions {
    pub names: Vec<String>,
    pub transaction: Transaction,
}

impl DestroyFilterOptions {
    pub fn new<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

impl From<&str> for DestroyFilterOptions {
    fn from(name: &str) -> Self {
        Self::new([name])
    }
}

/// Options for [`FiltersContext::destroy_filters`].
#[derive(Debug, Clone, Default)]
pub struct DestroyFiltersOptions {
    pub transaction: Transaction,
}

impl DestroyFiltersOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

impl From<()> for DestroyFiltersOptions {
    fn from((): ()) -> Self {
        Self::default()
    }
}

impl From<Transaction> for DestroyFiltersOptions {
    fn from(transaction: Transaction) -> Self {
        Self { transaction }
    }
}

transaction_options!(
    AddFilterValueOptions,
    RemoveFilterValueOptions,
    SetFilterValueOptions,
    DestroyFilterOptions,
    DestroyFiltersOptions,
);

// =============================================================================
// CONTEXT
// =============================================================================

/// Filters decoded from one read of the URL, bound to their provider.
///
/// # Example
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use url_filters::provider::{commit_to, FiltersProvider, SearchParams};
/// use url_filters::FilterInput;
///
/// let params = Rc::new(RefCell::new(SearchParams::new()));
/// let provider = FiltersProvider::builder()
///     .commit(commit_to(params.clone(), "q"))
///     .build();
///
/// let context = provider.read_search_params(&params.borrow());
/// let completion = context.add_filter_value(FilterInput::one("color", "red")).unwrap();
/// futures::executor::block_on(completion);
///
/// let context = provider.read_search_params(&params.borrow());
/// assert_eq!(context.get_filter_values("color").len(), 1);
/// ```
pub struct FiltersContext<'p> {
    provider: &'p FiltersProvider,
    filters: Filters,
}

impl<'p> FiltersContext<'p> {
    pub(crate) fn new(provider: &'p FiltersProvider, filters: Filters) -> Self {
        Self { provider, filters }
    }

    /// The decoded snapshot.
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn into_filters(self) -> Filters {
        self.filters
    }

    pub fn provider(&self) -> &'p FiltersProvider {
        self.provider
    }

    // =========================================================================
    // MUTATING OPERATIONS
    // =========================================================================

    /// Add values and commit the result.
    pub fn add_filter_value(
        &self,
        options: impl Into<AddFilterValueOptions>,
    ) -> Result<CommitCompletion, FiltersError> {
        let options = options.into();
        let commit = self.resolve_commit(&options.transaction, "add_filter_value")?;
        let updated = add_multiple_filter_values(&self.filters, &options.input, &options.hooks);
        Ok(self.sync(updated, &commit, &options.transaction.hooks))
    }

    /// Remove values and commit the result.
    pub fn remove_filter_value(
        &self,
        options: impl Into<RemoveFilterValueOptions>,
    ) -> Result<CommitCompletion, FiltersError> {
        let options = options.into();
        let commit = self.resolve_commit(&options.transaction, "remove_filter_value")?;
        let updated = remove_multiple_filter_values(&self.filters, &options.input);
        Ok(self.sync(updated, &commit, &options.transaction.hooks))
    }

    /// Replace the values of filters and commit the result.
    pub fn set_filter_value(
        &self,
        options: impl Into<SetFilterValueOptions>,
    ) -> Result<CommitCompletion, FiltersError> {
        let options = options.into();
        let commit = self.resolve_commit(&options.transaction, "set_filter_value")?;
        let updated = set_multiple_filter_values(&self.filters, &options.input);
        Ok(self.sync(updated, &commit, &options.transaction.hooks))
    }

    /// Remove whole filters and commit the result.
    pub fn destroy_filter(
        &self,
        options: impl Into<DestroyFilterOptions>,
    ) -> Result<CommitCompletion, FiltersError> {
        let options = options.into();
        let commit = self.resolve_commit(&options.transaction, "destroy_filter")?;
        let updated = remove_multiple_filters(&self.filters, &options.names);
        Ok(self.sync(updated, &commit, &options.transaction.hooks))
    }

    /// Commit an empty collection, removing the parameter.
    pub fn destroy_filters(
        &self,
        options: impl Into<DestroyFiltersOptions>,
    ) -> Result<CommitCompletion, FiltersError> {
        let options = options.into();
        let commit = self.resolve_commit(&options.transaction, "destroy_filters")?;
        Ok(self.sync(Filters::new(), &commit, &options.transaction.hooks))
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Values of filter `name`, empty when it is not set.
    pub fn get_filter_values(&self, name: &str) -> &[FilterValue] {
        peek_filter(&self.filters, name)
    }

    /// Values of filter `name` read as `T`.
    pub fn get_filter_values_as<T>(&self, name: &str) -> Result<Vec<T>, FiltersError>
    where
        T: DeserializeOwned,
    {
        peek_filter_as(&self.filters, name)
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn resolve_commit(
        &self,
        transaction: &Transaction,
        operation: &'static str,
    ) -> Result<CommitFn, FiltersError> {
        let commit = transaction
            .commit
            .clone()
            .or_else(|| self.provider.commit.clone())
            .ok_or(FiltersError::MissingCommit { operation })?;
        trace!(operation, overridden = transaction.commit.is_some(), "resolved commit");
        Ok(commit)
    }

    fn sync(&self, updated: Filters, commit: &CommitFn, hooks: &CommitHooks) -> CommitCompletion {
        sync_state(
            updated,
            commit.as_ref(),
            self.provider.serializer.as_ref(),
            hooks,
        )
    }
}

impl fmt::Debug for FiltersContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FiltersContext")
            .field("filters", &self.filters)
            .finish_non_exhaustive()
    }
}
