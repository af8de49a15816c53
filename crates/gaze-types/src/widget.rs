//! Widget configuration: the declarative description of one widget instance.
//!
//! On disk a widget is a flat table: a mandatory `type`, the common fields
//! (`title`, `slug`, `hide_header`) and whatever the widget type needs. In
//! memory it is split into [`WidgetMeta`] and a closed [`WidgetKind`] union.
//! Types without a built-in variant are kept as [`WidgetKind::Custom`] so an
//! unknown type is reported at fetch time instead of failing the whole config.

use crate::error::EmptyWidgetType;
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::borrow::Borrow;
use std::fmt;

/// Type identifiers of the built-in widgets.
pub mod kinds {
    pub const WEATHER: &str = "weather";
    pub const RSS: &str = "rss";
    pub const HACKER_NEWS: &str = "hacker-news";
    pub const GROUP: &str = "group";
    pub const SPLIT_COLUMN: &str = "split-column";
}

/// Default number of columns a split-column container lays its children into.
pub const DEFAULT_SPLIT_COLUMNS: u8 = 2;

/// Upper bound on split-column columns.
pub const MAX_SPLIT_COLUMNS: u8 = 5;

/// Identifier of a widget kind (`"weather"`, `"rss"`, `"group"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WidgetTypeId(String);

impl WidgetTypeId {
    /// Create a type id, rejecting empty or whitespace-only strings.
    pub fn new(id: impl Into<String>) -> Result<Self, EmptyWidgetType> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(EmptyWidgetType);
        }
        Ok(Self(id))
    }

    /// Type id from a string literal, for registering known widget types.
    ///
    /// # Panics
    ///
    /// Panics if `id` is empty.
    pub fn from_static(id: &'static str) -> Self {
        assert!(!id.trim().is_empty(), "widget type literal must not be empty");
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for WidgetTypeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for WidgetTypeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(D::Error::custom)
    }
}

/// Fields shared by every widget type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetMeta {
    /// Title shown in the widget header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Explicit per-page identifier; derived from the title or position when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Hide the widget header bar.
    #[serde(default, alias = "hideHeader")]
    pub hide_header: bool,
}

impl WidgetMeta {
    const KEYS: [&'static str; 4] = ["title", "slug", "hide_header", "hideHeader"];

    /// Pull the common fields out of a raw widget table.
    fn take_from(fields: &mut Map<String, Value>) -> Result<Self, serde_json::Error> {
        let mut meta = Map::new();
        for key in Self::KEYS {
            if let Some(value) = fields.remove(key) {
                meta.insert(key.to_string(), value);
            }
        }
        serde_json::from_value(Value::Object(meta))
    }
}

/// `weather` widget settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Display name of the location; also used as the lookup query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Provider API key. Never written back out.
    #[serde(default, alias = "apiKey", skip_serializing)]
    pub api_key: Option<String>,
}

/// `rss` widget settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RssConfig {
    #[serde(alias = "feedUrl")]
    pub feed_url: String,
    /// Maximum number of items to keep (default 10).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// Story ordering for the `hacker-news` widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HackerNewsSort {
    #[default]
    Top,
    New,
    Best,
}

impl HackerNewsSort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::New => "new",
            Self::Best => "best",
        }
    }
}

/// `hacker-news` widget settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HackerNewsConfig {
    /// Maximum number of stories (default 15).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    /// Stories visible before the renderer collapses the list (-1 never collapses).
    #[serde(default, alias = "collapseAfter", skip_serializing_if = "Option::is_none")]
    pub collapse_after: Option<i32>,
    #[serde(default, alias = "sortBy")]
    pub sort_by: HackerNewsSort,
    /// Comments link template; `{POST-ID}` is replaced by the story id.
    #[serde(
        default,
        alias = "commentsUrlTemplate",
        skip_serializing_if = "Option::is_none"
    )]
    pub comments_url_template: Option<String>,
}

/// `group` container: children rendered as tabs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupConfig {
    #[serde(default)]
    pub widgets: Vec<WidgetConfig>,
}

/// `split-column` container: children rendered side by side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplitColumnConfig {
    #[serde(default)]
    pub widgets: Vec<WidgetConfig>,
    #[serde(default, alias = "maxColumns", skip_serializing_if = "Option::is_none")]
    pub max_columns: Option<u8>,
}

impl SplitColumnConfig {
    /// Effective column count, clamped to `1..=MAX_SPLIT_COLUMNS`.
    pub fn columns(&self) -> u8 {
        self.max_columns
            .unwrap_or(DEFAULT_SPLIT_COLUMNS)
            .clamp(1, MAX_SPLIT_COLUMNS)
    }
}

/// A widget type this crate has no variant for. Its fields are kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomConfig {
    pub type_id: WidgetTypeId,
    pub params: Map<String, Value>,
}

/// Type-specific part of a widget configuration, keyed by `type`.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    Weather(WeatherConfig),
    Rss(RssConfig),
    HackerNews(HackerNewsConfig),
    Group(GroupConfig),
    SplitColumn(SplitColumnConfig),
    Custom(CustomConfig),
}

impl WidgetKind {
    /// The `type` string this variant is registered under.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Weather(_) => kinds::WEATHER,
            Self::Rss(_) => kinds::RSS,
            Self::HackerNews(_) => kinds::HACKER_NEWS,
            Self::Group(_) => kinds::GROUP,
            Self::SplitColumn(_) => kinds::SPLIT_COLUMN,
            Self::Custom(custom) => custom.type_id.as_str(),
        }
    }

    /// Declared children of a container kind.
    pub fn children(&self) -> Option<&[WidgetConfig]> {
        match self {
            Self::Group(group) => Some(&group.widgets),
            Self::SplitColumn(split) => Some(&split.widgets),
            _ => None,
        }
    }

    fn from_fields(
        type_id: WidgetTypeId,
        fields: Map<String, Value>,
    ) -> Result<Self, serde_json::Error> {
        let kind = match type_id.as_str() {
            kinds::WEATHER => Self::Weather(serde_json::from_value(Value::Object(fields))?),
            kinds::RSS => Self::Rss(serde_json::from_value(Value::Object(fields))?),
            kinds::HACKER_NEWS => Self::HackerNews(serde_json::from_value(Value::Object(fields))?),
            kinds::GROUP => Self::Group(serde_json::from_value(Value::Object(fields))?),
            kinds::SPLIT_COLUMN => {
                Self::SplitColumn(serde_json::from_value(Value::Object(fields))?)
            }
            _ => Self::Custom(CustomConfig {
                type_id: type_id.clone(),
                params: fields,
            }),
        };
        Ok(kind)
    }

    fn to_fields(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let value = match self {
            Self::Weather(c) => serde_json::to_value(c)?,
            Self::Rss(c) => serde_json::to_value(c)?,
            Self::HackerNews(c) => serde_json::to_value(c)?,
            Self::Group(c) => serde_json::to_value(c)?,
            Self::SplitColumn(c) => serde_json::to_value(c)?,
            Self::Custom(c) => return Ok(c.params.clone()),
        };
        match value {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }
}

/// One widget instance as declared in a page layout.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    pub meta: WidgetMeta,
    pub kind: WidgetKind,
}

impl WidgetConfig {
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            meta: WidgetMeta::default(),
            kind,
        }
    }

    /// A widget of a type with no built-in variant.
    pub fn custom(type_id: WidgetTypeId, params: Map<String, Value>) -> Self {
        Self::new(WidgetKind::Custom(CustomConfig { type_id, params }))
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.meta.title = Some(title.into());
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.meta.slug = Some(slug.into());
        self
    }

    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }

    pub fn title(&self) -> Option<&str> {
        self.meta.title.as_deref()
    }

    pub fn explicit_slug(&self) -> Option<&str> {
        self.meta.slug.as_deref()
    }

    pub fn children(&self) -> Option<&[WidgetConfig]> {
        self.kind.children()
    }
}

impl<'de> Deserialize<'de> for WidgetConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;
        let type_id = match fields.remove("type") {
            Some(Value::String(raw)) => WidgetTypeId::new(raw).map_err(D::Error::custom)?,
            Some(other) => {
                return Err(D::Error::custom(format!(
                    "widget `type` must be a string, got {other}"
                )))
            }
            None => return Err(D::Error::missing_field("type")),
        };
        let meta = WidgetMeta::take_from(&mut fields).map_err(D::Error::custom)?;
        let kind = WidgetKind::from_fields(type_id, fields).map_err(D::Error::custom)?;
        Ok(Self { meta, kind })
    }
}

impl Serialize for WidgetConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut fields = self.kind.to_fields().map_err(S::Error::custom)?;
        fields.insert("type".to_string(), Value::from(self.type_name()));
        if let Some(title) = &self.meta.title {
            fields.insert("title".to_string(), Value::from(title.as_str()));
        }
        if let Some(slug) = &self.meta.slug {
            fields.insert("slug".to_string(), Value::from(slug.as_str()));
        }
        if self.meta.hide_header {
            fields.insert("hide_header".to_string(), Value::Bool(true));
        }
        fields.serialize(serializer)
    }
}
