//! `rss` widget: fetch an RSS 2.0 feed and keep its newest items.

use crate::http;
use async_trait::async_trait;
use gaze_kernel::{FetchContext, WidgetFetcher};
use gaze_types::data::{RssData, RssItem};
use gaze_types::widget::WidgetKind;
use gaze_types::{FetchError, WidgetConfig, WidgetData};
use regex_lite::Regex;
use tracing::{debug, info};

/// Items kept when the widget sets no `limit`.
pub const DEFAULT_LIMIT: usize = 10;

/// Feed title used when the feed has none.
const FALLBACK_TITLE: &str = "RSS Feed";

/// Fetcher for `rss`.
#[derive(Debug, Clone)]
pub struct RssFetcher {
    client: reqwest::Client,
}

impl RssFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WidgetFetcher for RssFetcher {
    async fn fetch(
        &self,
        config: &WidgetConfig,
        _cx: &FetchContext<'_>,
    ) -> Result<WidgetData, FetchError> {
        let WidgetKind::Rss(rss) = &config.kind else {
            return Err(FetchError::InvalidConfig(format!(
                "expected an `rss` widget, got `{}`",
                config.type_name()
            )));
        };
        if rss.feed_url.trim().is_empty() {
            return Err(FetchError::InvalidConfig("rss feed_url is empty".to_string()));
        }

        debug!(url = %rss.feed_url, "Fetching feed");
        let body = http::send(self.client.get(&rss.feed_url), &rss.feed_url)
            .await?
            .text()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;

        let mut data = parse_feed(&body);
        data.items.truncate(rss.limit.unwrap_or(DEFAULT_LIMIT));
        info!(url = %rss.feed_url, items = data.items.len(), "Feed fetched");
        Ok(WidgetData::Rss(data))
    }
}

/// Extract the channel title and items from an RSS document.
///
/// Items without a title or link are skipped. A missing `pubDate` is left
/// empty. Descriptions have their markup stripped.
pub fn parse_feed(xml: &str) -> RssData {
    let item_re = Regex::new(r"(?is)<item(?:\s[^>]*)?>(.*?)</item>").expect("item regex is valid");
    let title_re = element_regex("title");
    let link_re = element_regex("link");
    let date_re = element_regex("pubDate");
    let desc_re = element_regex("description");

    // The channel title is the first <title> outside any <item>.
    let head = xml.split("<item").next().unwrap_or(xml);
    let feed_title = capture(&title_re, head)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| FALLBACK_TITLE.to_string());

    let items = item_re
        .captures_iter(xml)
        .filter_map(|caps| {
            let content = caps.get(1)?.as_str();
            let title = capture(&title_re, content).filter(|t| !t.is_empty())?;
            let link = capture(&link_re, content).filter(|l| !l.is_empty())?;
            Some(RssItem {
                title,
                link,
                pub_date: capture(&date_re, content).unwrap_or_default(),
                description: capture(&desc_re, content)
                    .map(|d| strip_tags(&d))
                    .filter(|d| !d.is_empty()),
            })
        })
        .collect();

    RssData { feed_title, items }
}

fn element_regex(tag: &str) -> Regex {
    Regex::new(&format!(
        r"(?is)<{tag}(?:\s[^>]*)?>\s*(?:<!\[CDATA\[)?(.*?)(?:\]\]>)?\s*</{tag}>"
    ))
    .expect("element regex is valid")
}

fn capture(re: &Regex, haystack: &str) -> Option<String> {
    re.captures(haystack)
        .and_then(|caps| caps.get(1))
        .map(|m| decode_entities(m.as_str().trim()))
}

fn strip_tags(html: &str) -> String {
    let tag_re = Regex::new(r"<[^>]*>").expect("tag regex is valid");
    tag_re.replace_all(html, "").trim().to_string()
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
