//! Widget data payloads produced by fetchers.

use crate::result::{ContainerData, SplitColumnData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Data fetched for one widget, one variant per widget kind.
///
/// Serialized untagged: the renderer already knows the widget type from the
/// config that travels alongside the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WidgetData {
    Weather(WeatherData),
    Rss(RssData),
    HackerNews(HackerNewsData),
    Group(ContainerData),
    SplitColumn(SplitColumnData),
    /// Payload of a widget type registered outside this workspace.
    Custom(serde_json::Value),
}

/// Current conditions for a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    pub location: String,
    /// Degrees Celsius.
    pub temperature: f64,
    pub condition: String,
    /// Relative humidity, percent.
    pub humidity: f64,
    /// km/h.
    pub wind_speed: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub last_updated: DateTime<Utc>,
}

/// A parsed RSS feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RssData {
    pub feed_title: String,
    pub items: Vec<RssItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RssItem {
    pub title: String,
    pub link: String,
    pub pub_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Stories from Hacker News.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HackerNewsData {
    pub stories: Vec<HackerNewsStory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HackerNewsStory {
    pub id: u64,
    pub title: String,
    pub url: String,
    pub comments_url: String,
    /// Host of `url` without a leading `www.`; empty for text posts.
    pub domain: String,
    pub score: i64,
    pub comment_count: u64,
    pub time_posted: DateTime<Utc>,
}
