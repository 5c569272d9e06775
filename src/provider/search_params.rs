// ============================================================================
// url-filters - Search Params
// An ordered, percent-encoded query string
// ============================================================================

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use url::form_urlencoded;

/// Query string pairs in their original order.
///
/// Parsing and printing use `application/x-www-form-urlencoded` rules, so a
/// serialized filters collection survives the trip through a URL unchanged.
///
/// # Example
/// ```
/// use url_filters::provider::SearchParams;
///
/// let mut params = SearchParams::parse("?page=2&q=abc");
/// params.set("q", r#"[{"a":"1"},[1]]"#);
/// params.delete("page");
///
/// assert_eq!(params.to_string(), "q=%5B%7B%22a%22%3A%221%22%7D%2C%5B1%5D%5D");
/// assert_eq!(params.get("q"), Some(r#"[{"a":"1"},[1]]"#));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pairs: Vec<(String, String)>,
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, with or without its leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = form_urlencoded::parse(query.as_bytes())
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect();
        Self { pairs }
    }

    /// First value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set `name` to `value`.
    ///
    /// The first occurrence is overwritten in place and any later ones are
    /// dropped; a new name is appended.
    pub fn set(&mut self, name: &str, value: &str) {
        let mut seen = false;
        self.pairs.retain_mut(|(key, existing)| {
            if key.as_str() != name {
                return true;
            }
            if seen {
                return false;
            }
            seen = true;
            value.clone_into(existing);
            true
        });
        if !seen {
            self.pairs.push((name.to_string(), value.to_string()));
        }
    }

    /// Remove every occurrence of `name`.
    pub fn delete(&mut self, name: &str) {
        self.pairs.retain(|(key, _)| key != name);
    }

    /// Set `name` when a value is given, delete it otherwise.
    pub fn apply(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(value) => self.set(name, value),
            None => self.delete(name),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl fmt::Display for SearchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish();
        f.write_str(&encoded)
    }
}

/// Commit that writes into shared search params under `name`.
///
/// `Some` sets the parameter and `None` deletes it.
///
/// # Example
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use url_filters::provider::{commit_to, SearchParams};
///
/// let params = Rc::new(RefCell::new(SearchParams::parse("q=old&page=1")));
/// let commit = commit_to(params.clone(), "q");
///
/// commit(None);
/// assert_eq!(params.borrow().to_string(), "page=1");
/// ```
pub fn commit_to(
    params: Rc<RefCell<SearchParams>>,
    name: impl Into<String>,
) -> impl Fn(Option<String>) + 'static {
    let name = name.into();
    move |serialized: Option<String>| params.borrow_mut().apply(&name, serialized.as_deref())
}
