//! Integration tests for the page fetch pipeline.
//!
//! These tests register in-process mock fetchers, build pages through the
//! real layout types, and drive them through `PageFetcher` end to end.
//!
//! No network is involved; mocks record what they were asked to fetch.

use async_trait::async_trait;
use gaze_kernel::config::validate_config;
use gaze_kernel::containers::register_containers;
use gaze_kernel::{FetchContext, PageFetcher, WidgetDefinition, WidgetFetcher, WidgetRegistry};
use gaze_types::widget::{GroupConfig, RssConfig, SplitColumnConfig, WeatherConfig};
use gaze_types::{
    Column, ColumnSize, FetchError, Page, WidgetConfig, WidgetData, WidgetKind, WidgetOutcome,
    WidgetTypeId,
};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Mock fetchers
// ---------------------------------------------------------------------------

/// Echoes the widget's title and records every call.
#[derive(Default)]
struct EchoFetcher {
    calls: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl WidgetFetcher for EchoFetcher {
    async fn fetch(
        &self,
        config: &WidgetConfig,
        _cx: &FetchContext<'_>,
    ) -> Result<WidgetData, FetchError> {
        let title = config.title().unwrap_or("untitled").to_string();
        self.calls.lock().unwrap().push(title.clone());
        Ok(WidgetData::Custom(json!({ "echo": title })))
    }
}

/// Fails when the widget's title contains "fail".
struct FlakyFetcher;

#[async_trait]
impl WidgetFetcher for FlakyFetcher {
    async fn fetch(
        &self,
        config: &WidgetConfig,
        _cx: &FetchContext<'_>,
    ) -> Result<WidgetData, FetchError> {
        match config.title() {
            Some(title) if title.contains("fail") => Err(FetchError::Status {
                url: "https://example.com/rss".to_string(),
                status: 500,
            }),
            _ => Ok(WidgetData::Custom(json!("ok"))),
        }
    }
}

/// Sleeps, tracking the highest number of concurrent calls.
#[derive(Default)]
struct SlowFetcher {
    current: AtomicUsize,
    peak: Arc<AtomicUsize>,
}

#[async_trait]
impl WidgetFetcher for SlowFetcher {
    async fn fetch(
        &self,
        _config: &WidgetConfig,
        _cx: &FetchContext<'_>,
    ) -> Result<WidgetData, FetchError> {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(10)).await;
        self.current.fetch_sub(1, Ordering::SeqCst);
        Ok(WidgetData::Custom(json!(null)))
    }
}

/// Sleeps longer for earlier titles, recording the order calls finish in.
#[derive(Default)]
struct DelayedFetcher {
    finished: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl WidgetFetcher for DelayedFetcher {
    async fn fetch(
        &self,
        config: &WidgetConfig,
        _cx: &FetchContext<'_>,
    ) -> Result<WidgetData, FetchError> {
        let title = config.title().unwrap_or("untitled").to_string();
        let delay = match title.as_str() {
            "Slow" => 60,
            "Medium" => 30,
            _ => 0,
        };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        self.finished.lock().unwrap().push(title.clone());
        Ok(WidgetData::Custom(json!(title)))
    }
}

struct PanickingFetcher;

#[async_trait]
impl WidgetFetcher for PanickingFetcher {
    async fn fetch(
        &self,
        _config: &WidgetConfig,
        _cx: &FetchContext<'_>,
    ) -> Result<WidgetData, FetchError> {
        panic!("feed parser exploded");
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn weather() -> WidgetConfig {
    WidgetConfig::new(WidgetKind::Weather(WeatherConfig::default()))
}

fn rss(title: &str) -> WidgetConfig {
    WidgetConfig::new(WidgetKind::Rss(RssConfig {
        feed_url: "https://example.com/rss".to_string(),
        limit: None,
    }))
    .with_title(title)
}

fn group(widgets: Vec<WidgetConfig>) -> WidgetConfig {
    WidgetConfig::new(WidgetKind::Group(GroupConfig { widgets }))
}

fn custom(type_name: &str) -> WidgetConfig {
    WidgetConfig::custom(WidgetTypeId::new(type_name).unwrap(), Default::default())
}

fn page(head: Vec<WidgetConfig>, columns: Vec<Vec<WidgetConfig>>) -> Page {
    let mut page = Page::new("Home");
    page.head_widgets = head;
    page.columns = columns
        .into_iter()
        .map(|widgets| Column {
            size: ColumnSize::Full,
            widgets,
        })
        .collect();
    page
}

/// Registry with the containers plus `weather` and `rss` as echo fetchers.
fn echo_registry() -> (WidgetRegistry, Arc<Mutex<Vec<String>>>) {
    let echo = EchoFetcher::default();
    let calls = echo.calls.clone();
    let echo = WidgetDefinition::new(echo);

    let mut registry = WidgetRegistry::new();
    register_containers(&mut registry);
    registry.register(WidgetTypeId::from_static("weather"), echo.clone());
    registry.register(WidgetTypeId::from_static("rss"), echo);
    (registry, calls)
}

fn fetcher(registry: WidgetRegistry) -> PageFetcher {
    PageFetcher::new(Arc::new(registry))
}

fn child_slugs(data: Option<&WidgetData>) -> Vec<String> {
    match data {
        Some(WidgetData::Group(group)) => group
            .child_results
            .iter()
            .map(|c| c.slug.to_string())
            .collect(),
        Some(WidgetData::SplitColumn(split)) => split
            .child_results
            .iter()
            .map(|c| c.slug.to_string())
            .collect(),
        other => panic!("expected container data, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_head_and_column_widgets_keyed_by_slug() {
    let (registry, calls) = echo_registry();
    let page = page(
        vec![weather().with_slug("w1")],
        vec![vec![rss("Tech News")]],
    );

    let results = fetcher(registry).fetch_page(&page).await;

    let slugs: Vec<&str> = results.slugs().map(|s| s.as_str()).collect();
    assert_eq!(slugs, vec!["w1", "tech-news"]);
    assert!(results.get("w1").unwrap().is_success());
    assert_eq!(
        results.get("tech-news").unwrap().data(),
        Some(&WidgetData::Custom(json!({ "echo": "Tech News" })))
    );
    assert_eq!(calls.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_empty_page_yields_empty_results() {
    let (registry, calls) = echo_registry();
    let results = fetcher(registry).fetch_page(&Page::new("Blank")).await;
    assert!(results.is_empty());
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_failure_is_isolated_to_its_slot() {
    let mut registry = WidgetRegistry::new();
    registry.register(
        WidgetTypeId::from_static("rss"),
        WidgetDefinition::new(FlakyFetcher),
    );
    let page = page(vec![], vec![vec![rss("good"), rss("will fail"), rss("also good")]]);

    let results = fetcher(registry).fetch_page(&page).await;

    assert_eq!(results.len(), 3);
    assert!(results.get("good").unwrap().is_success());
    assert!(results.get("also-good").unwrap().is_success());
    let failed = results.get("will-fail").unwrap();
    assert!(failed.is_failure());
    assert_eq!(
        failed.error_message(),
        Some("https://example.com/rss returned HTTP 500")
    );

    let summary = results.summary();
    assert_eq!((summary.ok, summary.failed, summary.unregistered), (2, 1, 0));
}

#[tokio::test]
async fn test_unknown_type_is_not_registered() {
    let (registry, _) = echo_registry();
    let page = page(vec![], vec![vec![custom("stocks"), weather()]]);

    let results = fetcher(registry).fetch_page(&page).await;

    let stocks = results.get("stocks-0").unwrap();
    assert_eq!(stocks.outcome, WidgetOutcome::NotRegistered);
    assert!(results.get("weather-1").unwrap().is_success());

    let value = serde_json::to_value(&results).unwrap();
    assert!(value["stocks-0"]["data"].is_null());
    assert_eq!(value["stocks-0"]["unregistered"], true);
    assert_eq!(value["stocks-0"]["config"]["type"], "stocks");
}

#[tokio::test]
async fn test_panicking_fetcher_becomes_failure() {
    let (mut registry, _) = echo_registry();
    registry.register(
        WidgetTypeId::from_static("exploding"),
        WidgetDefinition::new(PanickingFetcher),
    );
    let page = page(vec![], vec![vec![custom("exploding"), rss("Survivor")]]);

    let results = fetcher(registry).fetch_page(&page).await;

    let exploded = results.get("exploding-0").unwrap();
    assert!(exploded.is_failure());
    assert!(exploded
        .error_message()
        .unwrap()
        .contains("feed parser exploded"));
    assert!(results.get("survivor").unwrap().is_success());
}

#[tokio::test]
async fn test_reregistration_uses_latest_definition() {
    let (mut registry, _) = echo_registry();
    registry.register(
        WidgetTypeId::from_static("rss"),
        WidgetDefinition::from_fn(|_config| async { Ok(WidgetData::Custom(json!("second"))) }),
    );
    let page = page(vec![], vec![vec![rss("Feed")]]);

    let results = fetcher(registry).fetch_page(&page).await;
    assert_eq!(
        results.get("feed").unwrap().data(),
        Some(&WidgetData::Custom(json!("second")))
    );
}

#[tokio::test]
async fn test_empty_group_returns_no_children() {
    let (registry, _) = echo_registry();
    let page = page(vec![], vec![vec![group(vec![]).with_title("Tabs")]]);

    let results = fetcher(registry).fetch_page(&page).await;

    let tabs = results.get("tabs").unwrap();
    assert!(tabs.is_success());
    let value = serde_json::to_value(tabs).unwrap();
    assert_eq!(value["data"]["child_results"], json!([]));
}

#[tokio::test]
async fn test_group_children_get_their_own_slug_scope() {
    let (registry, _) = echo_registry();
    let page = page(
        vec![],
        vec![vec![
            rss("Feed One"),
            group(vec![rss("Feed One"), rss("Feed One"), weather()]),
        ]],
    );

    let results = fetcher(registry).fetch_page(&page).await;

    let slugs: Vec<&str> = results.slugs().map(|s| s.as_str()).collect();
    assert_eq!(slugs, vec!["feed-one", "group-1"]);
    assert_eq!(
        child_slugs(results.get("group-1").unwrap().data()),
        vec!["feed-one", "feed-one-2", "weather-2"]
    );
}

#[tokio::test]
async fn test_failing_child_does_not_fail_container() {
    let mut registry = WidgetRegistry::new();
    register_containers(&mut registry);
    registry.register(
        WidgetTypeId::from_static("rss"),
        WidgetDefinition::new(FlakyFetcher),
    );
    let split = WidgetConfig::new(WidgetKind::SplitColumn(SplitColumnConfig {
        widgets: vec![rss("left"), rss("fail right"), custom("mystery")],
        max_columns: None,
    }));
    let page = page(vec![], vec![vec![split]]);

    let results = fetcher(registry).fetch_page(&page).await;

    let container = results.get("split-column-0").unwrap();
    let Some(WidgetData::SplitColumn(data)) = container.data() else {
        panic!("expected split-column data, got {:?}", container.outcome);
    };
    assert_eq!(data.max_columns, 2);
    assert!(data.child_results[0].result.is_success());
    assert!(data.child_results[1].result.is_failure());
    assert!(data.child_results[2].result.is_not_registered());
}

#[tokio::test]
async fn test_nested_containers_within_depth() {
    let (registry, _) = echo_registry();
    let nested = group(vec![group(vec![rss("Deep")]).with_title("Inner")]).with_title("Outer");
    let page = page(vec![], vec![vec![nested]]);

    let results = fetcher(registry).fetch_page(&page).await;

    let outer = results.get("outer").unwrap();
    let Some(WidgetData::Group(outer)) = outer.data() else {
        panic!("expected group data");
    };
    let inner = &outer.child_results[0];
    assert_eq!(inner.slug.as_str(), "inner");
    assert_eq!(child_slugs(inner.result.data()), vec!["deep"]);
}

#[tokio::test]
async fn test_nesting_beyond_limit_fails_only_that_container() {
    let (registry, calls) = echo_registry();
    let nested = group(vec![
        rss("Shallow"),
        group(vec![rss("Too deep")]).with_title("Inner"),
    ])
    .with_title("Outer");
    let page = page(vec![], vec![vec![nested]]);

    let results = PageFetcher::new(Arc::new(registry))
        .with_max_depth(1)
        .fetch_page(&page)
        .await;

    let Some(WidgetData::Group(outer)) = results.get("outer").unwrap().data() else {
        panic!("expected outer group to succeed");
    };
    assert!(outer.child_results[0].result.is_success());
    let inner = &outer.child_results[1].result;
    assert!(inner.is_failure());
    assert_eq!(
        inner.error_message(),
        Some("Container nesting exceeds maximum depth of 1")
    );
    assert_eq!(*calls.lock().unwrap(), vec!["Shallow".to_string()]);
}

#[tokio::test]
async fn test_page_concurrency_is_bounded() {
    let slow = SlowFetcher::default();
    let peak = slow.peak.clone();
    let mut registry = WidgetRegistry::new();
    registry.register(WidgetTypeId::from_static("weather"), WidgetDefinition::new(slow));

    let widgets: Vec<WidgetConfig> = (0..9).map(|_| weather()).collect();
    let page = page(vec![], vec![widgets]);

    let results = PageFetcher::new(Arc::new(registry))
        .with_max_concurrency(2)
        .fetch_page(&page)
        .await;

    assert_eq!(results.len(), 9);
    assert_eq!(peak.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_container_children_keep_declared_order() {
    let delayed = DelayedFetcher::default();
    let finished = delayed.finished.clone();
    let mut registry = WidgetRegistry::new();
    register_containers(&mut registry);
    registry.register(WidgetTypeId::from_static("rss"), WidgetDefinition::new(delayed));

    let page = page(
        vec![],
        vec![vec![group(vec![rss("Slow"), rss("Medium"), rss("Fast")])]],
    );
    let results = fetcher(registry).fetch_page(&page).await;

    assert_eq!(
        *finished.lock().unwrap(),
        vec!["Fast".to_string(), "Medium".to_string(), "Slow".to_string()]
    );

    let Some(WidgetData::Group(group)) = results.get("group-0").unwrap().data() else {
        panic!("expected group data");
    };
    let slugs: Vec<String> = group.child_results.iter().map(|c| c.slug.to_string()).collect();
    assert_eq!(slugs, vec!["slow", "medium", "fast"]);
    let echoes: Vec<_> = group
        .child_results
        .iter()
        .map(|c| c.result.data().cloned())
        .collect();
    assert_eq!(
        echoes,
        vec![
            Some(WidgetData::Custom(json!("Slow"))),
            Some(WidgetData::Custom(json!("Medium"))),
            Some(WidgetData::Custom(json!("Fast"))),
        ]
    );
}

#[tokio::test]
async fn test_empty_nested_group_fetches_within_validated_depth() {
    let (registry, _) = echo_registry();
    let page = page(vec![], vec![vec![group(vec![group(vec![])])]]);

    let config = gaze_types::GazeConfig {
        fetch: gaze_types::FetchSettings {
            max_nesting_depth: 1,
            ..Default::default()
        },
        pages: vec![page.clone()],
    };
    assert!(validate_config(&config).is_ok());

    let results = fetcher(registry).with_max_depth(1).fetch_page(&page).await;
    let outer = results.get("group-0").unwrap();
    assert!(outer.is_success());
    assert_eq!(child_slugs(outer.data()), vec!["group-0"]);
}

#[tokio::test]
async fn test_repeated_fetches_produce_same_keys() {
    let (registry, _) = echo_registry();
    let fetcher = fetcher(registry);
    let page = page(
        vec![weather()],
        vec![vec![rss("A"), rss("A"), group(vec![rss("B")])]],
    );

    let first: Vec<String> = fetcher
        .fetch_page(&page)
        .await
        .slugs()
        .map(|s| s.to_string())
        .collect();
    let second: Vec<String> = fetcher
        .fetch_page(&page)
        .await
        .slugs()
        .map(|s| s.to_string())
        .collect();

    assert_eq!(first, vec!["weather-0", "a", "a-2", "group-3"]);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_fetch_pages_keeps_page_order() {
    let (registry, _) = echo_registry();
    let mut first = page(vec![], vec![vec![rss("One")]]);
    first.name = "First".to_string();
    let mut second = page(vec![], vec![vec![rss("Two"), rss("Three")]]);
    second.name = "Second".to_string();

    let results = fetcher(registry).fetch_pages(&[first, second]).await;

    assert_eq!(results.len(), 2);
    assert!(results[0].contains("one"));
    assert_eq!(results[1].len(), 2);
}
