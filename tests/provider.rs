use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::Deserialize;
use serde_json::json;
use url_filters::provider::{
    AddFilterValueOptions, DestroyFilterOptions, DestroyFiltersOptions, FiltersProvider,
    RemoveFilterValueOptions, SearchParams, SetFilterValueOptions, Transaction, commit_to,
};
use url_filters::sync::async_commit;
use url_filters::{FilterInput, FiltersError, JsonCodec, SetFilterInput, filters};

/// An in-memory location whose query string is rewritten by every commit.
struct Location {
    params: Rc<RefCell<SearchParams>>,
    provider: FiltersProvider,
}

impl Location {
    fn new(query: &str) -> Self {
        let params = Rc::new(RefCell::new(SearchParams::parse(query)));
        let provider = FiltersProvider::builder()
            .commit(commit_to(params.clone(), "q"))
            .build();
        Self { params, provider }
    }

    fn query(&self) -> String {
        self.params.borrow().to_string()
    }

    fn filters(&self) -> url_filters::Filters {
        let params = self.params.borrow();
        self.provider.read_search_params(&params).into_filters()
    }
}

#[tokio::test]
async fn search_and_pagination_flow() {
    let location = Location::new("?tab=open");

    let context = location.provider.read_search_params(&location.params.borrow());
    let completion = context
        .set_filter_value(SetFilterValueOptions::new([
            SetFilterInput::one("search", "write"),
            SetFilterInput::one("page", 1),
        ]))
        .unwrap();
    completion.await;
    assert_eq!(location.filters(), filters! { "search" => ["write"], "page" => [1] });

    let context = location.provider.read_search_params(&location.params.borrow());
    context
        .set_filter_value(SetFilterInput::one("page", 2))
        .unwrap()
        .await;
    assert_eq!(location.filters(), filters! { "search" => ["write"], "page" => [2] });

    let context = location.provider.read_search_params(&location.params.borrow());
    context
        .set_filter_value(SetFilterInput::clear("search"))
        .unwrap()
        .await;
    assert_eq!(location.filters(), filters! { "page" => [2] });
    assert!(location.query().starts_with("tab=open&q="));
}

#[tokio::test]
async fn destroy_filters_removes_parameter() {
    let location = Location::new("tab=open");
    let context = location.provider.read_search_params(&location.params.borrow());
    context
        .add_filter_value(FilterInput::many("status", ["todo", "doing"]))
        .unwrap()
        .await;
    assert!(location.query().contains("q="));

    let context = location.provider.read_search_params(&location.params.borrow());
    context
        .destroy_filters(DestroyFiltersOptions::new())
        .unwrap()
        .await;

    assert_eq!(location.query(), "tab=open");
    assert!(location.filters().is_empty());
}

#[tokio::test]
async fn destroy_filter_accepts_several_names() {
    let location = Location::new("");
    let context = location.provider.read_search_params(&location.params.borrow());
    context
        .add_filter_value(AddFilterValueOptions::new([
            FilterInput::one("a", 1),
            FilterInput::one("b", 2),
            FilterInput::one("c", 3),
        ]))
        .unwrap()
        .await;

    let context = location.provider.read_search_params(&location.params.borrow());
    context
        .destroy_filter(DestroyFilterOptions::new(["a", "c", "missing"]))
        .unwrap()
        .await;

    assert_eq!(location.filters(), filters! { "b" => [2] });
}

#[tokio::test]
async fn remove_filter_value_batch() {
    let location = Location::new("");
    let context = location.provider.read_search_params(&location.params.borrow());
    context
        .add_filter_value(FilterInput::many("color", ["red", "blue", "green"]))
        .unwrap()
        .await;

    let context = location.provider.read_search_params(&location.params.borrow());
    context
        .remove_filter_value(RemoveFilterValueOptions::new([
            FilterInput::one("color", "red"),
            FilterInput::one("color", "green"),
        ]))
        .unwrap()
        .await;

    assert_eq!(location.filters(), filters! { "color" => ["blue"] });
}

#[test]
fn missing_commit_is_raised_immediately() {
    let provider = FiltersProvider::default();
    let added = Rc::new(Cell::new(false));
    let flag = added.clone();

    let result = provider.read(None).add_filter_value(
        AddFilterValueOptions::new([FilterInput::one("a", 1)]).on_before_add(move |_, _| flag.set(true)),
    );

    let Err(error) = result else {
        panic!("expected a missing commit error");
    };
    assert!(matches!(error, FiltersError::MissingCommit { .. }));
    assert!(error.to_string().contains("add_filter_value"));
    assert!(!added.get());
}

#[tokio::test]
async fn per_call_transaction_overrides_provider_commit() {
    let location = Location::new("");
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let after = Rc::new(Cell::new(0));
    let after_count = after.clone();

    let transaction = Transaction::new()
        .commit(async_commit(move |serialized: Option<String>| {
            let sink = sink.clone();
            async move {
                sink.borrow_mut().push(serialized);
            }
        }))
        .on_after_commit(move |_| after_count.set(after_count.get() + 1));

    let context = location.provider.read_search_params(&location.params.borrow());
    context
        .add_filter_value(AddFilterValueOptions::new([FilterInput::one("a", 1)]).transaction(transaction))
        .unwrap()
        .await;

    assert_eq!(location.query(), "");
    assert_eq!(*seen.borrow(), vec![Some(r#"[{"a":"1"},[1]]"#.to_string())]);
    assert_eq!(after.get(), 1);
}

#[tokio::test]
async fn custom_codec_and_parameter_name() {
    let params = Rc::new(RefCell::new(SearchParams::new()));
    let provider = FiltersProvider::builder()
        .search_param_name("filters")
        .serializer(JsonCodec)
        .deserializer(JsonCodec)
        .commit(commit_to(params.clone(), "filters"))
        .build();

    let context = provider.read_search_params(&params.borrow());
    context
        .add_filter_value(FilterInput::one("page", 3))
        .unwrap()
        .await;

    assert_eq!(params.borrow().get("filters"), Some(r#"{"page":[3]}"#));
    let context = provider.read_search_params(&params.borrow());
    assert_eq!(context.get_filter_values("page"), &[json!(3)]);
}

#[test]
fn malformed_parameter_reads_as_empty() {
    let errors = Rc::new(Cell::new(0));
    let counter = errors.clone();
    let provider = FiltersProvider::builder()
        .on_deserializer_error(move |_| counter.set(counter.get() + 1))
        .build();

    let context = provider.read_search_params(&SearchParams::parse("q=not+valid+flatted+text"));

    assert!(context.filters().is_empty());
    assert_eq!(errors.get(), 1);
}

#[test]
fn typed_reads() {
    #[derive(Debug, PartialEq, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct DateRange {
        start: String,
        end: String,
        date_range_name: String,
    }

    let provider = FiltersProvider::default();
    let text = provider.serialize(&filters! {
        "date" => [{ "start": "11-27-2023", "end": "12-27-2023", "dateRangeName": "Last30Days" }],
        "page" => [2],
    });
    let context = provider.read(Some(&text));

    let ranges: Vec<DateRange> = context.get_filter_values_as("date").unwrap();
    assert_eq!(
        ranges,
        vec![DateRange {
            start: "11-27-2023".into(),
            end: "12-27-2023".into(),
            date_range_name: "Last30Days".into(),
        }]
    );
    assert!(context.get_filter_values_as::<String>("page").is_err());
}
