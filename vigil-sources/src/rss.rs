//! RSS/Atom feed adapter
//!
//! Items need both a title and a link. Descriptions arrive as HTML and are
//! reduced to plain text.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use scraper::Html;
use tracing::debug;

use vigil_core::{normalize_whitespace, truncate_chars, Article, RssFeed};

use crate::{random_user_agent, SourceAdapter, SourceError, SourceQuery};

const DESCRIPTION_MAX_CHARS: usize = 500;
const TIMEOUT: Duration = Duration::from_secs(15);

/// Reduce an HTML fragment to its whitespace-normalized text
pub fn strip_html(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text = fragment.root_element().text().collect::<Vec<_>>().join(" ");
    normalize_whitespace(&text)
}

/// Parse a feed body into at most `feed.max_items` articles.
///
/// Items without a publication date are stamped `now`.
pub fn parse_feed(body: &[u8], feed: &RssFeed, now: DateTime<Utc>) -> Result<Vec<Article>, SourceError> {
    let parsed = feed_rs::parser::parse(body).map_err(|e| SourceError::parse(feed.name, e))?;

    Ok(parsed
        .entries
        .into_iter()
        .take(feed.max_items)
        .filter_map(|entry| {
            let title = entry.title?.content;
            let url = entry.links.first()?.href.clone();
            let description = entry
                .summary
                .map(|s| truncate_chars(&strip_html(&s.content), DESCRIPTION_MAX_CHARS))
                .unwrap_or_default();
            let published = entry.published.or(entry.updated).unwrap_or(now);

            Some(Article {
                title,
                content: description.clone(),
                description,
                source_name: feed.name.to_string(),
                published_at: published.to_rfc3339(),
                language: "en".to_string(),
                url,
            })
        })
        .collect())
}

pub struct RssAdapter {
    client: Client,
    feed: &'static RssFeed,
}

impl RssAdapter {
    pub fn new(client: Client, feed: &'static RssFeed) -> Self {
        Self { client, feed }
    }
}

#[async_trait]
impl SourceAdapter for RssAdapter {
    fn name(&self) -> String {
        format!("rss:{}", self.feed.name)
    }

    async fn fetch(&self, _query: &SourceQuery) -> Result<Vec<Article>, SourceError> {
        let response = self
            .client
            .get(self.feed.url)
            .header(reqwest::header::USER_AGENT, random_user_agent())
            .timeout(TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Status {
                adapter: self.name(),
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await?;
        let articles = parse_feed(&body, self.feed, Utc::now())?;
        debug!("{}: fetched {} articles", self.feed.name, articles.len());
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Kyiv Independent</title>
    <link>https://kyivindependent.com</link>
    <description>News from Ukraine</description>
    <item>
      <title>Drone attack on Kyiv overnight</title>
      <link>https://kyivindependent.com/drone-attack</link>
      <pubDate>Sun, 22 Feb 2026 10:00:00 +0000</pubDate>
      <description>&lt;p&gt;Air defence &lt;b&gt;active&lt;/b&gt; over the capital&lt;/p&gt;</description>
    </item>
    <item>
      <title>Undated item</title>
      <link>https://kyivindependent.com/undated</link>
    </item>
    <item>
      <title>Third item</title>
      <link>https://kyivindependent.com/third</link>
    </item>
  </channel>
</rss>"#;

    static TEST_FEED: RssFeed = RssFeed {
        name: "Kyiv Independent",
        url: "https://kyivindependent.com/feed/",
        max_items: 2,
    };

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello <i>world</i></p>"), "Hello world");
        assert_eq!(strip_html("plain text"), "plain text");
    }

    #[test]
    fn test_parse_feed() {
        let now = Utc.with_ymd_and_hms(2026, 2, 23, 0, 0, 0).unwrap();
        let articles = parse_feed(FEED.as_bytes(), &TEST_FEED, now).unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "Drone attack on Kyiv overnight");
        assert_eq!(articles[0].url, "https://kyivindependent.com/drone-attack");
        assert_eq!(articles[0].description, "Air defence active over the capital");
        assert_eq!(articles[0].source_name, "Kyiv Independent");
        assert_eq!(
            articles[0].published(),
            Some(Utc.with_ymd_and_hms(2026, 2, 22, 10, 0, 0).unwrap())
        );
        assert_eq!(articles[1].published(), Some(now));
    }

    #[test]
    fn test_parse_feed_rejects_garbage() {
        let now = Utc::now();
        assert!(parse_feed(b"not a feed", &TEST_FEED, now).is_err());
    }
}
