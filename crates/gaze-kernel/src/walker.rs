//! Layout walking: turn a page (or a container's children) into the ordered
//! list of widgets to fetch, each with its resolved slug.
//!
//! Page order is head widgets first, then each column left to right, each
//! column top to bottom. Container children are not expanded here; a
//! container fetches its own children when it runs.

use crate::slug::SlugScope;
use gaze_types::{Page, WidgetConfig, WidgetSlug};
use serde::Serialize;

/// A widget scheduled for fetching within one scope.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedWidget<'a> {
    pub slug: WidgetSlug,
    pub config: &'a WidgetConfig,
}

/// Top-level widgets of a page in layout order.
pub fn page_widgets(page: &Page) -> impl Iterator<Item = &WidgetConfig> {
    page.head_widgets
        .iter()
        .chain(page.columns.iter().flat_map(|column| column.widgets.iter()))
}

/// Assign slugs to a sequence of sibling widgets.
///
/// Positional slugs use each widget's index within `widgets`.
pub fn plan_widgets<'a, I>(widgets: I) -> Vec<PlannedWidget<'a>>
where
    I: IntoIterator<Item = &'a WidgetConfig>,
{
    let mut scope = SlugScope::new();
    widgets
        .into_iter()
        .enumerate()
        .map(|(index, config)| PlannedWidget {
            slug: scope.claim(config, index),
            config,
        })
        .collect()
}

/// Plan every top-level widget of `page`.
pub fn plan_page(page: &Page) -> Vec<PlannedWidget<'_>> {
    plan_widgets(page_widgets(page))
}

/// Static view of a layout: every widget with its slug, containers expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanNode {
    pub slug: WidgetSlug,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PlanNode>,
}

/// Expand the whole layout tree of `page` without fetching anything.
pub fn plan_tree(page: &Page) -> Vec<PlanNode> {
    tree_of(page_widgets(page))
}

fn tree_of<'a, I>(widgets: I) -> Vec<PlanNode>
where
    I: IntoIterator<Item = &'a WidgetConfig>,
{
    plan_widgets(widgets)
        .into_iter()
        .map(|planned| PlanNode {
            slug: planned.slug,
            type_name: planned.config.type_name().to_string(),
            title: planned.config.title().map(str::to_string),
            children: planned
                .config
                .children()
                .map(|children| tree_of(children))
                .unwrap_or_default(),
        })
        .collect()
}

/// Deepest container nesting in `widgets`: 0 for leaves only, 1 for a
/// container of leaves, and so on.
///
/// An empty container adds no level; fetching it never descends.
pub fn nesting_depth(widgets: &[WidgetConfig]) -> usize {
    widgets
        .iter()
        .filter_map(|widget| widget.children())
        .filter(|children| !children.is_empty())
        .map(|children| 1 + nesting_depth(children))
        .max()
        .unwrap_or(0)
}
