//! `hacker-news` widget backed by the public Firebase API.

use crate::http;
use async_trait::async_trait;
use chrono::DateTime;
use gaze_kernel::{FetchContext, FetchScheduler, WidgetFetcher};
use gaze_types::data::{HackerNewsData, HackerNewsStory};
use gaze_types::widget::WidgetKind;
use gaze_types::{FetchError, WidgetConfig, WidgetData};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Stories kept when the widget sets no `limit`.
pub const DEFAULT_LIMIT: usize = 15;

/// Comments link used when the widget sets no template.
pub const DEFAULT_COMMENTS_TEMPLATE: &str = "https://news.ycombinator.com/item?id={POST-ID}";

const API_BASE: &str = "https://hacker-news.firebaseio.com/v0";

/// Fetcher for `hacker-news`.
#[derive(Debug, Clone)]
pub struct HackerNewsFetcher {
    client: reqwest::Client,
    scheduler: FetchScheduler,
}

impl HackerNewsFetcher {
    /// `max_concurrency` bounds the per-story item requests.
    pub fn new(client: reqwest::Client, max_concurrency: usize) -> Self {
        Self {
            client,
            scheduler: FetchScheduler::new(max_concurrency),
        }
    }

    async fn fetch_item(&self, id: u64) -> Option<HackerNewsItem> {
        let url = format!("{API_BASE}/item/{id}.json");
        match http::get_json::<Option<HackerNewsItem>>(&self.client, &url).await {
            Ok(item) => item,
            Err(e) => {
                warn!(id, error = %e, "Failed to fetch Hacker News item");
                None
            }
        }
    }
}

#[async_trait]
impl WidgetFetcher for HackerNewsFetcher {
    async fn fetch(
        &self,
        config: &WidgetConfig,
        _cx: &FetchContext<'_>,
    ) -> Result<WidgetData, FetchError> {
        let WidgetKind::HackerNews(hn) = &config.kind else {
            return Err(FetchError::InvalidConfig(format!(
                "expected a `hacker-news` widget, got `{}`",
                config.type_name()
            )));
        };

        let limit = hn.limit.unwrap_or(DEFAULT_LIMIT);
        let list_url = format!("{API_BASE}/{}stories.json", hn.sort_by.as_str());
        debug!(sort = hn.sort_by.as_str(), limit, "Fetching Hacker News stories");

        let ids: Vec<u64> = http::get_json(&self.client, &list_url).await?;
        let tasks: Vec<_> = ids
            .into_iter()
            .take(limit)
            .map(|id| self.fetch_item(id))
            .collect();

        let template = hn
            .comments_url_template
            .as_deref()
            .unwrap_or(DEFAULT_COMMENTS_TEMPLATE);
        let stories: Vec<HackerNewsStory> = self
            .scheduler
            .run(tasks)
            .await
            .into_iter()
            .flatten()
            .filter_map(|item| story_from_item(item, template))
            .collect();

        info!(stories = stories.len(), "Hacker News stories fetched");
        Ok(WidgetData::HackerNews(HackerNewsData { stories }))
    }
}

#[derive(Debug, Deserialize)]
struct HackerNewsItem {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    descendants: u64,
    #[serde(default)]
    time: i64,
    #[serde(default)]
    deleted: bool,
    #[serde(default)]
    dead: bool,
}

/// Turn an API item into a story. Deleted, dead and untitled items are dropped.
///
/// Text posts have no external URL; they link to their comments page.
fn story_from_item(item: HackerNewsItem, comments_template: &str) -> Option<HackerNewsStory> {
    if item.deleted || item.dead {
        return None;
    }
    let title = item.title.filter(|t| !t.is_empty())?;
    let comments_url = comments_template.replace("{POST-ID}", &item.id.to_string());
    let (url, domain) = match item.url.filter(|u| !u.is_empty()) {
        Some(url) => {
            let domain = extract_domain(&url);
            (url, domain)
        }
        None => (comments_url.clone(), String::new()),
    };

    Some(HackerNewsStory {
        id: item.id,
        domain,
        title,
        url,
        comments_url,
        score: item.score,
        comment_count: item.descendants,
        time_posted: DateTime::from_timestamp(item.time, 0).unwrap_or_default(),
    })
}

/// Host of `url` without a leading `www.`, or empty when it does not parse.
pub fn extract_domain(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
        .unwrap_or_default()
}
