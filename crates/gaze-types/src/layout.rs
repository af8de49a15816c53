//! Dashboard layout: pages, columns, and fetch settings.

use crate::widget::WidgetConfig;
use serde::{Deserialize, Serialize};

/// Default cap on in-flight widget fetches per batch.
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Default HTTP timeout for widget fetchers.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Default maximum container nesting depth.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 8;

/// User agent sent by the built-in widgets.
pub const DEFAULT_USER_AGENT: &str = "Gaze-Dashboard/1.0";

/// Root configuration: fetch settings plus the page list. The first page is the homepage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GazeConfig {
    pub fetch: FetchSettings,
    pub pages: Vec<Page>,
}

impl GazeConfig {
    /// Find a page by name (case-insensitive) or by its explicit slug.
    pub fn page(&self, name: &str) -> Option<&Page> {
        self.pages.iter().find(|page| {
            page.name.eq_ignore_ascii_case(name) || page.slug.as_deref() == Some(name)
        })
    }
}

/// `[fetch]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Maximum widget fetches in flight per batch (page or container).
    pub max_concurrency: usize,
    /// Per-request timeout for the built-in widgets.
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Containers nested deeper than this fail instead of fetching.
    pub max_nesting_depth: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

/// Desktop max-width preset of a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidthPreset {
    Slim,
    #[default]
    Default,
    Wide,
}

impl WidthPreset {
    /// CSS max-width for this preset.
    pub fn max_width(self) -> &'static str {
        match self {
            Self::Slim => "1100px",
            Self::Default => "1600px",
            Self::Wide => "1920px",
        }
    }
}

/// Column width: `small` is fixed, `full` takes the remaining space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnSize {
    Small,
    Full,
}

/// A column and its widgets, top to bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub size: ColumnSize,
    #[serde(default)]
    pub widgets: Vec<WidgetConfig>,
}

/// One dashboard page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default)]
    pub width: WidthPreset,
    /// Widgets spanning all columns above the column layout.
    #[serde(default, alias = "headWidgets")]
    pub head_widgets: Vec<WidgetConfig>,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Page {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: None,
            width: WidthPreset::default(),
            head_widgets: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Number of top-level widgets (nested container children excluded).
    pub fn widget_count(&self) -> usize {
        self.head_widgets.len()
            + self
                .columns
                .iter()
                .map(|column| column.widgets.len())
                .sum::<usize>()
    }
}
