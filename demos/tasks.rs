//! Task list with search and pagination kept in the `q` query parameter.
//!
//! Run with: RUST_LOG=url_filters=trace cargo run --example tasks

use std::cell::RefCell;
use std::rc::Rc;

use url_filters::provider::{
    DestroyFiltersOptions, FiltersContext, FiltersProvider, SearchParams, SetFilterValueOptions,
    commit_to,
};
use url_filters::{FiltersError, SetFilterInput};

const PAGE_SIZE: usize = 10;

fn configure_logging() {
    use tracing_subscriber::prelude::*;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// An address bar: the query string every commit rewrites.
struct Browser {
    params: Rc<RefCell<SearchParams>>,
    provider: FiltersProvider,
}

impl Browser {
    fn open(query: &str) -> Self {
        let params = Rc::new(RefCell::new(SearchParams::parse(query)));
        let provider = FiltersProvider::builder()
            .commit(commit_to(params.clone(), "q"))
            .on_deserializer_error(|error| tracing::warn!(%error, "ignoring malformed filters"))
            .build();
        Self { params, provider }
    }

    fn context(&self) -> FiltersContext<'_> {
        self.provider.read_search_params(&self.params.borrow())
    }

    fn render(&self, tasks: &[String]) {
        let context = self.context();
        let search = context
            .get_filter_values_as::<String>("search")
            .ok()
            .and_then(|values| values.into_iter().next())
            .unwrap_or_default();
        let page = context
            .get_filter_values_as::<usize>("page")
            .ok()
            .and_then(|values| values.into_iter().next())
            .unwrap_or(1)
            .max(1);

        let matching: Vec<&String> = tasks
            .iter()
            .filter(|task| task.to_lowercase().contains(&search.to_lowercase()))
            .collect();
        let total_pages = matching.len().div_ceil(PAGE_SIZE);
        let shown: Vec<&str> = matching
            .iter()
            .skip((page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .map(|task| task.as_str())
            .collect();

        println!("?{}", self.params.borrow());
        if total_pages == 0 {
            println!("  No Results");
        } else {
            println!("  page {page} / {total_pages}: {}", shown.join(", "));
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), FiltersError> {
    configure_logging();

    let tasks: Vec<String> = (1..=50).map(|id| format!("Task {id}")).collect();
    let browser = Browser::open("?view=list");
    browser.render(&tasks);

    // Search resets the page.
    browser
        .context()
        .set_filter_value(SetFilterValueOptions::new([
            SetFilterInput::one("page", 1),
            SetFilterInput::one("search", "task 1"),
        ]))?
        .await;
    browser.render(&tasks);

    browser
        .context()
        .set_filter_value(SetFilterInput::one("page", 2))?
        .await;
    browser.render(&tasks);

    browser
        .context()
        .destroy_filters(DestroyFiltersOptions::new())?
        .await;
    browser.render(&tasks);

    // A shared link with a broken parameter still renders.
    let shared = Browser::open("?q=not+valid+flatted+text");
    shared.render(&tasks);

    Ok(())
}
