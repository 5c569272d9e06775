// ============================================================================
// url-filters - Filters Provider
// Configuration shared by every read of the URL parameter
// ============================================================================

use std::fmt;
use std::rc::Rc;

use crate::codec::{Deserializer, Flatted, Serializer};
use crate::core::constants::DEFAULT_SEARCH_PARAM_NAME;
use crate::core::error::CodecError;
use crate::core::types::Filters;
use crate::sync::{Commit, CommitFn, DeserializeHooks, deserialize_filters};

use super::context::FiltersContext;
use super::search_params::SearchParams;

/// Holds the codec, the parameter name and the default commit.
///
/// A provider is cheap to clone; every piece of configuration is shared.
///
/// # Example
/// ```
/// use url_filters::provider::FiltersProvider;
///
/// let provider = FiltersProvider::builder().search_param_name("filters").build();
/// let context = provider.read(Some(r#"[{"page":"1"},[2]]"#));
///
/// assert_eq!(provider.search_param_name(), "filters");
/// assert_eq!(context.filters().len(), 1);
/// ```
#[derive(Clone)]
pub struct FiltersProvider {
    pub(crate) search_param_name: String,
    pub(crate) serializer: Rc<dyn Serializer>,
    pub(crate) deserializer: Rc<dyn Deserializer>,
    pub(crate) deserialize_hooks: DeserializeHooks,
    pub(crate) commit: Option<CommitFn>,
}

impl FiltersProvider {
    pub fn builder() -> FiltersProviderBuilder {
        FiltersProviderBuilder::default()
    }

    /// Name of the query parameter holding the collection.
    pub fn search_param_name(&self) -> &str {
        &self.search_param_name
    }

    /// Derive a context from the raw parameter value.
    pub fn read(&self, serialized: Option<&str>) -> FiltersContext<'_> {
        let filters =
            deserialize_filters(serialized, self.deserializer.as_ref(), &self.deserialize_hooks);
        FiltersContext::new(self, filters)
    }

    /// Derive a context from the configured parameter of `params`.
    pub fn read_search_params(&self, params: &SearchParams) -> FiltersContext<'_> {
        self.read(params.get(&self.search_param_name))
    }

    /// Encode `filters` with the configured serializer.
    pub fn serialize(&self, filters: &Filters) -> String {
        self.serializer.serialize(filters)
    }
}

impl Default for FiltersProvider {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for FiltersProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FiltersProvider")
            .field("search_param_name", &self.search_param_name)
            .field("deserialize_hooks", &self.deserialize_hooks)
            .field("commit", &self.commit.is_some())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Builder for [`FiltersProvider`].
#[derive(Default)]
pub struct FiltersProviderBuilder {
    search_param_name: Option<String>,
    serializer: Option<Rc<dyn Serializer>>,
    deserializer: Option<Rc<dyn Deserializer>>,
    deserialize_hooks: DeserializeHooks,
    commit: Option<CommitFn>,
}

impl FiltersProviderBuilder {
    /// Query parameter name. Defaults to `q`.
    pub fn search_param_name(mut self, name: impl Into<String>) -> Self {
        self.search_param_name = Some(name.into());
        self
    }

    /// Serializer used by every commit. Defaults to [`Flatted`].
    pub fn serializer(mut self, serializer: impl Serializer + 'static) -> Self {
        self.serializer = Some(Rc::new(serializer));
        self
    }

    /// Deserializer used by every read. Defaults to [`Flatted`].
    pub fn deserializer(mut self, deserializer: impl Deserializer + 'static) -> Self {
        self.deserializer = Some(Rc::new(deserializer));
        self
    }

    pub fn deserialize_hooks(mut self, hooks: DeserializeHooks) -> Self {
        self.deserialize_hooks = hooks;
        self
    }

    pub fn on_before_deserializer(mut self, hook: impl Fn() + 'static) -> Self {
        self.deserialize_hooks = self.deserialize_hooks.on_before_deserializer(hook);
        self
    }

    pub fn on_after_deserializer(mut self, hook: impl Fn(&Filters) + 'static) -> Self {
        self.deserialize_hooks = self.deserialize_hooks.on_after_deserializer(hook);
        self
    }

    pub fn on_deserializer_error(mut self, hook: impl Fn(&CodecError) + 'static) -> Self {
        self.deserialize_hooks = self.deserialize_hooks.on_deserializer_error(hook);
        self
    }

    /// Commit used by operations that do not bring their own.
    pub fn commit(mut self, commit: impl Commit + 'static) -> Self {
        self.commit = Some(Rc::new(commit));
        self
    }

    pub fn build(self) -> FiltersProvider {
        FiltersProvider {
            search_param_name: self
                .search_param_name
                .unwrap_or_else(|| DEFAULT_SEARCH_PARAM_NAME.to_string()),
            serializer: self.serializer.unwrap_or_else(|| Rc::new(Flatted)),
            deserializer: self.deserializer.unwrap_or_else(|| Rc::new(Flatted)),
            deserialize_hooks: self.deserialize_hooks,
            commit: self.commit,
        }
    }
}

impl fmt::Debug for FiltersProviderBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FiltersProviderBuilder")
            .field("search_param_name", &self.search_param_name)
            .field("serializer", &self.serializer.is_some())
            .field("deserializer", &self.deserializer.is_some())
            .field("commit", &self.commit.is_some())
            .finish_non_exhaustive()
    }
}
