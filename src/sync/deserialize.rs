// ============================================================================
// url-filters - Deserialization Boundary
// Turn the URL parameter into a filters collection, never failing
// ============================================================================

use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::codec::Deserializer;
use crate::core::error::CodecError;
use crate::core::types::Filters;

/// Observer with no arguments.
pub type NotifyFn = Rc<dyn Fn()>;

/// Observers around [`deserialize_filters`].
#[derive(Clone, Default)]
pub struct DeserializeHooks {
    /// Fires first, on every call.
    pub on_before_deserializer: Option<NotifyFn>,
    /// Fires with the decoded collection when decoding succeeds.
    pub on_after_deserializer: Option<Rc<dyn Fn(&Filters)>>,
    /// Fires with the error when decoding fails.
    pub on_deserializer_error: Option<Rc<dyn Fn(&CodecError)>>,
}

impl DeserializeHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_before_deserializer(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_before_deserializer = Some(Rc::new(hook));
        self
    }

    pub fn on_after_deserializer(mut self, hook: impl Fn(&Filters) + 'static) -> Self {
        self.on_after_deserializer = Some(Rc::new(hook));
        self
    }

    pub fn on_deserializer_error(mut self, hook: impl Fn(&CodecError) + 'static) -> Self {
        self.on_deserializer_error = Some(Rc::new(hook));
        self
    }
}

impl fmt::Debug for DeserializeHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeserializeHooks")
            .field("on_before_deserializer", &self.on_before_deserializer.is_some())
            .field("on_after_deserializer", &self.on_after_deserializer.is_some())
            .field("on_deserializer_error", &self.on_deserializer_error.is_some())
            .finish()
    }
}

/// Decode the serialized parameter value.
///
/// A missing or empty value yields an empty collection without consulting
/// the deserializer. Decoding errors are reported to the error hook and also
/// yield an empty collection.
///
/// # Example
/// ```
/// use url_filters::codec::Flatted;
/// use url_filters::sync::{deserialize_filters, DeserializeHooks};
///
/// let hooks = DeserializeHooks::default();
/// let filters = deserialize_filters(Some(r#"[{"page":"1"},[2]]"#), &Flatted, &hooks);
/// assert_eq!(filters.len(), 1);
///
/// let broken = deserialize_filters(Some("not valid flatted text"), &Flatted, &hooks);
/// assert!(broken.is_empty());
/// ```
pub fn deserialize_filters<D>(
    serialized: Option<&str>,
    deserializer: &D,
    hooks: &DeserializeHooks,
) -> Filters
where
    D: Deserializer + ?Sized,
{
    if let Some(hook) = &hooks.on_before_deserializer {
        hook();
    }

    let Some(text) = serialized.filter(|text| !text.is_empty()) else {
        return Filters::new();
    };

    match deserializer.deserialize(text) {
        Ok(filters) => {
            debug!(filters = filters.len(), "deserialized filters");
            if let Some(hook) = &hooks.on_after_deserializer {
                hook(&filters);
            }
            filters
        }
        Err(error) => {
            warn!(%error, "failed to deserialize filters, starting from an empty collection");
            if let Some(hook) = &hooks.on_deserializer_error {
                hook(&error);
            }
            Filters::new()
        }
    }
}
