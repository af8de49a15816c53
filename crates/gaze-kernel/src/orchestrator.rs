//! Page orchestrator: fetches every widget of a page concurrently and
//! collects the results keyed by slug.

use crate::adapter::fetch_one;
use crate::registry::WidgetRegistry;
use crate::scheduler::FetchScheduler;
use crate::walker::{plan_page, plan_widgets, PlannedWidget};
use futures::future::join_all;
use gaze_types::layout::{DEFAULT_MAX_CONCURRENCY, DEFAULT_MAX_NESTING_DEPTH};
use gaze_types::{
    ChildResult, FetchError, FetchSettings, Page, PageResults, WidgetConfig, WidgetResult,
    WidgetSlug,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Entry point for fetching page data.
///
/// Holds the frozen registry. Cloning is cheap and shares the registry.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    registry: Arc<WidgetRegistry>,
    scheduler: FetchScheduler,
    max_depth: usize,
}

impl PageFetcher {
    /// Fetcher with the default limits (10 in flight, nesting depth 8).
    pub fn new(registry: Arc<WidgetRegistry>) -> Self {
        Self {
            registry,
            scheduler: FetchScheduler::new(DEFAULT_MAX_CONCURRENCY),
            max_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }

    /// Fetcher configured from the `[fetch]` table.
    pub fn from_settings(registry: Arc<WidgetRegistry>, settings: &FetchSettings) -> Self {
        Self::new(registry)
            .with_max_concurrency(settings.max_concurrency)
            .with_max_depth(settings.max_nesting_depth)
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.scheduler = FetchScheduler::new(max_concurrency);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    pub fn max_concurrency(&self) -> usize {
        self.scheduler.max_concurrency()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Fetch every top-level widget of `page`.
    ///
    /// Always returns one entry per widget; individual failures are recorded
    /// in their slot and never abort the page.
    pub async fn fetch_page(&self, page: &Page) -> PageResults {
        let start = Instant::now();
        let planned = plan_page(page);
        info!(page = %page.name, widgets = planned.len(), "Fetching page");

        let fetched = self.fetch_planned(planned, 0).await;
        let mut results = PageResults::with_capacity(fetched.len());
        for (slug, result) in fetched {
            results.insert(slug, result);
        }

        let summary = results.summary();
        info!(
            page = %page.name,
            ok = summary.ok,
            failed = summary.failed,
            unregistered = summary.unregistered,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Page fetched"
        );
        results
    }

    /// Fetch several pages concurrently. Each page gets its own batch limit.
    pub async fn fetch_pages(&self, pages: &[Page]) -> Vec<PageResults> {
        join_all(pages.iter().map(|page| self.fetch_page(page))).await
    }

    /// Fetch a single widget outside any page, as a top-level widget.
    pub async fn fetch_widget(&self, config: &WidgetConfig) -> WidgetResult {
        let cx = FetchContext {
            fetcher: self,
            depth: 0,
        };
        fetch_one(&self.registry, config, &cx).await
    }

    async fn fetch_planned(
        &self,
        planned: Vec<PlannedWidget<'_>>,
        depth: usize,
    ) -> Vec<(WidgetSlug, WidgetResult)> {
        let cx = FetchContext {
            fetcher: self,
            depth,
        };
        let tasks: Vec<_> = planned
            .into_iter()
            .map(|planned| self.fetch_slot(planned, &cx))
            .collect();

        self.scheduler.run(tasks).await
    }

    async fn fetch_slot(
        &self,
        planned: PlannedWidget<'_>,
        cx: &FetchContext<'_>,
    ) -> (WidgetSlug, WidgetResult) {
        let result = fetch_one(&self.registry, planned.config, cx).await;
        (planned.slug, result)
    }
}

/// What a fetcher knows about where it runs.
///
/// Container fetchers use it to fetch their children with the same
/// scheduling and failure isolation as top-level widgets.
#[derive(Debug, Clone, Copy)]
pub struct FetchContext<'a> {
    fetcher: &'a PageFetcher,
    depth: usize,
}

impl FetchContext<'_> {
    /// Nesting depth of the widget being fetched: 0 for top-level widgets.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> usize {
        self.fetcher.max_depth
    }

    /// Fetch `children` as one batch, one level deeper than the caller.
    ///
    /// Children get slugs from a fresh scope, so positional indices restart
    /// at zero. Results come back in declared order. Fails only when the
    /// children would sit deeper than the configured maximum.
    pub async fn fetch_children(
        &self,
        children: &[WidgetConfig],
    ) -> Result<Vec<ChildResult>, FetchError> {
        if children.is_empty() {
            return Ok(Vec::new());
        }

        let depth = self.depth + 1;
        if depth > self.fetcher.max_depth {
            return Err(FetchError::NestingTooDeep {
                max_depth: self.fetcher.max_depth,
            });
        }

        debug!(children = children.len(), depth, "Fetching container children");
        let fetched = self
            .fetcher
            .fetch_planned(plan_widgets(children), depth)
            .await;

        Ok(fetched
            .into_iter()
            .map(|(slug, result)| ChildResult { slug, result })
            .collect())
    }
}
