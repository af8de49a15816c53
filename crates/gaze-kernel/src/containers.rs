//! Container widgets: `group` (tabs) and `split-column` (side by side).
//!
//! A container's data is the list of its children's results. Children are
//! fetched through [`FetchContext::fetch_children`], so a failing child only
//! marks its own slot and the container itself still succeeds.

use crate::orchestrator::FetchContext;
use crate::registry::{WidgetDefinition, WidgetFetcher, WidgetRegistry};
use async_trait::async_trait;
use gaze_types::widget::kinds;
use gaze_types::{
    ContainerData, FetchError, SplitColumnData, WidgetConfig, WidgetData, WidgetKind, WidgetTypeId,
};
use tracing::warn;

/// Fetcher for `group`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GroupFetcher;

#[async_trait]
impl WidgetFetcher for GroupFetcher {
    async fn fetch(
        &self,
        config: &WidgetConfig,
        cx: &FetchContext<'_>,
    ) -> Result<WidgetData, FetchError> {
        let WidgetKind::Group(group) = &config.kind else {
            return Err(mismatch(kinds::GROUP, config));
        };

        if group.widgets.is_empty() {
            warn!(title = config.title().unwrap_or_default(), "Group has no widgets");
        }

        let child_results = cx.fetch_children(&group.widgets).await?;
        Ok(WidgetData::Group(ContainerData { child_results }))
    }
}

/// Fetcher for `split-column`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SplitColumnFetcher;

#[async_trait]
impl WidgetFetcher for SplitColumnFetcher {
    async fn fetch(
        &self,
        config: &WidgetConfig,
        cx: &FetchContext<'_>,
    ) -> Result<WidgetData, FetchError> {
        let WidgetKind::SplitColumn(split) = &config.kind else {
            return Err(mismatch(kinds::SPLIT_COLUMN, config));
        };

        let child_results = cx.fetch_children(&split.widgets).await?;
        Ok(WidgetData::SplitColumn(SplitColumnData {
            max_columns: split.columns(),
            child_results,
        }))
    }
}

fn mismatch(expected: &str, config: &WidgetConfig) -> FetchError {
    FetchError::InvalidConfig(format!(
        "expected a `{expected}` widget, got `{}`",
        config.type_name()
    ))
}

/// Register `group` and `split-column`. Both draw their own chrome.
pub fn register_containers(registry: &mut WidgetRegistry) {
    registry.register(
        WidgetTypeId::from_static(kinds::GROUP),
        WidgetDefinition::new(GroupFetcher).frameless(),
    );
    registry.register(
        WidgetTypeId::from_static(kinds::SPLIT_COLUMN),
        WidgetDefinition::new(SplitColumnFetcher).frameless(),
    );
}
