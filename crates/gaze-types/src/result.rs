//! Fetch result envelope and the per-page results map.

use crate::data::WidgetData;
use crate::widget::WidgetConfig;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

/// Identifier of one widget instance within a page's results (or within one
/// container's children).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetSlug(String);

impl WidgetSlug {
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for WidgetSlug {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WidgetSlug {
    fn from(slug: &str) -> Self {
        Self(slug.to_string())
    }
}

impl From<String> for WidgetSlug {
    fn from(slug: String) -> Self {
        Self(slug)
    }
}

/// How a single widget fetch settled.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetOutcome {
    /// The fetcher returned data.
    Success(WidgetData),
    /// The fetcher returned an error or panicked.
    Failure { message: String },
    /// No fetcher is registered for the widget's type.
    NotRegistered,
}

/// The outcome of one widget fetch, always paired with the config it came from.
///
/// Serialized for the renderer as `{config, data}` on success,
/// `{config, error: true, message}` on failure and
/// `{config, data: null, unregistered: true}` for unknown types.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetResult {
    pub config: WidgetConfig,
    pub outcome: WidgetOutcome,
}

impl WidgetResult {
    pub fn success(config: WidgetConfig, data: WidgetData) -> Self {
        Self {
            config,
            outcome: WidgetOutcome::Success(data),
        }
    }

    pub fn failure(config: WidgetConfig, message: impl Into<String>) -> Self {
        Self {
            config,
            outcome: WidgetOutcome::Failure {
                message: message.into(),
            },
        }
    }

    pub fn not_registered(config: WidgetConfig) -> Self {
        Self {
            config,
            outcome: WidgetOutcome::NotRegistered,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, WidgetOutcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, WidgetOutcome::Failure { .. })
    }

    pub fn is_not_registered(&self) -> bool {
        matches!(self.outcome, WidgetOutcome::NotRegistered)
    }

    pub fn data(&self) -> Option<&WidgetData> {
        match &self.outcome {
            WidgetOutcome::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            WidgetOutcome::Failure { message } => Some(message),
            _ => None,
        }
    }
}

impl Serialize for WidgetResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("config", &self.config)?;
        match &self.outcome {
            WidgetOutcome::Success(data) => map.serialize_entry("data", data)?,
            WidgetOutcome::Failure { message } => {
                map.serialize_entry("error", &true)?;
                map.serialize_entry("message", message)?;
            }
            WidgetOutcome::NotRegistered => {
                map.serialize_entry("data", &Option::<()>::None)?;
                map.serialize_entry("unregistered", &true)?;
            }
        }
        map.end()
    }
}

/// One child slot of a container, in declared order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildResult {
    pub slug: WidgetSlug,
    #[serde(flatten)]
    pub result: WidgetResult,
}

/// Aggregate returned by the `group` container.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContainerData {
    pub child_results: Vec<ChildResult>,
}

/// Aggregate returned by the `split-column` container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitColumnData {
    pub max_columns: u8,
    pub child_results: Vec<ChildResult>,
}

/// Counts of settled outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub ok: usize,
    pub failed: usize,
    pub unregistered: usize,
}

/// Every widget result of one page, keyed by slug.
///
/// Slugs are also kept in layout order so the renderer (and JSON output)
/// see a stable ordering regardless of completion order.
#[derive(Debug, Clone, Default)]
pub struct PageResults {
    entries: HashMap<WidgetSlug, WidgetResult>,
    order: Vec<WidgetSlug>,
}

impl PageResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
        }
    }

    /// Insert a result. Replacing an existing slug keeps its original position
    /// and returns the previous result.
    pub fn insert(&mut self, slug: WidgetSlug, result: WidgetResult) -> Option<WidgetResult> {
        let previous = self.entries.insert(slug.clone(), result);
        if previous.is_none() {
            self.order.push(slug);
        }
        previous
    }

    pub fn get(&self, slug: &str) -> Option<&WidgetResult> {
        self.entries.get(slug)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.entries.contains_key(slug)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Slugs in layout order.
    pub fn slugs(&self) -> impl Iterator<Item = &WidgetSlug> {
        self.order.iter()
    }

    /// `(slug, result)` pairs in layout order.
    pub fn iter(&self) -> impl Iterator<Item = (&WidgetSlug, &WidgetResult)> {
        self.order
            .iter()
            .filter_map(|slug| self.entries.get(slug).map(|result| (slug, result)))
    }

    pub fn summary(&self) -> ResultSummary {
        let mut summary = ResultSummary::default();
        for result in self.entries.values() {
            match result.outcome {
                WidgetOutcome::Success(_) => summary.ok += 1,
                WidgetOutcome::Failure { .. } => summary.failed += 1,
                WidgetOutcome::NotRegistered => summary.unregistered += 1,
            }
        }
        summary
    }
}

impl Serialize for PageResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (slug, result) in self.iter() {
            map.serialize_entry(slug, result)?;
        }
        map.end()
    }
}
