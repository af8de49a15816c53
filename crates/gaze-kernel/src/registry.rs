//! Widget registry: maps widget type ids to their fetch behavior.
//!
//! The registry is filled once during startup through `&mut` access and then
//! frozen by moving it into an `Arc` handed to the [`PageFetcher`]. From that
//! point on it is read-only, so concurrent fetches need no locking.
//!
//! [`PageFetcher`]: crate::orchestrator::PageFetcher

use crate::orchestrator::FetchContext;
use async_trait::async_trait;
use gaze_types::{FetchError, WidgetConfig, WidgetData, WidgetTypeId};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// Produces a widget's data from its configuration.
///
/// Leaf fetchers ignore `cx`. Container fetchers use it to fetch their
/// children through the same scheduler and failure isolation as a page.
#[async_trait]
pub trait WidgetFetcher: Send + Sync {
    async fn fetch(
        &self,
        config: &WidgetConfig,
        cx: &FetchContext<'_>,
    ) -> Result<WidgetData, FetchError>;
}

/// Adapts a closure `Fn(WidgetConfig) -> impl Future<Output = Result<..>>` into a fetcher.
pub struct FnFetcher<F>(F);

#[async_trait]
impl<F, Fut> WidgetFetcher for FnFetcher<F>
where
    F: Fn(WidgetConfig) -> Fut + Send + Sync,
    Fut: Future<Output = Result<WidgetData, FetchError>> + Send + 'static,
{
    async fn fetch(
        &self,
        config: &WidgetConfig,
        _cx: &FetchContext<'_>,
    ) -> Result<WidgetData, FetchError> {
        (self.0)(config.clone()).await
    }
}

/// How the renderer should frame a widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Wrapped in the standard header + card chrome.
    #[default]
    Framed,
    /// Draws its own chrome (containers).
    Frameless,
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Framed => write!(f, "framed"),
            RenderMode::Frameless => write!(f, "frameless"),
        }
    }
}

/// Everything the kernel knows about one widget type.
#[derive(Clone)]
pub struct WidgetDefinition {
    pub fetcher: Arc<dyn WidgetFetcher>,
    pub render: RenderMode,
}

impl WidgetDefinition {
    pub fn new(fetcher: impl WidgetFetcher + 'static) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            render: RenderMode::Framed,
        }
    }

    /// Definition backed by an async closure.
    pub fn from_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(WidgetConfig) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<WidgetData, FetchError>> + Send + 'static,
    {
        Self::new(FnFetcher(f))
    }

    pub fn frameless(mut self) -> Self {
        self.render = RenderMode::Frameless;
        self
    }
}

impl fmt::Debug for WidgetDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetDefinition")
            .field("render", &self.render)
            .finish_non_exhaustive()
    }
}

/// Registry of widget types.
#[derive(Debug, Default)]
pub struct WidgetRegistry {
    definitions: HashMap<WidgetTypeId, WidgetDefinition>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a widget type.
    ///
    /// Registering a type twice replaces the earlier definition (last write
    /// wins) and logs a warning. Returns the replaced definition, if any.
    pub fn register(
        &mut self,
        type_id: WidgetTypeId,
        definition: WidgetDefinition,
    ) -> Option<WidgetDefinition> {
        let previous = self.definitions.insert(type_id.clone(), definition);
        if previous.is_some() {
            warn!(widget_type = %type_id, "Widget type is already registered, overwriting");
        } else {
            debug!(widget_type = %type_id, "Registered widget type");
        }
        previous
    }

    /// Look up a widget type.
    pub fn get(&self, type_name: &str) -> Option<&WidgetDefinition> {
        self.definitions.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.definitions.contains_key(type_name)
    }

    /// Registered type ids, sorted.
    pub fn types(&self) -> Vec<&WidgetTypeId> {
        let mut types: Vec<_> = self.definitions.keys().collect();
        types.sort();
        types
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
