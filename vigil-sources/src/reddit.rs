//! Reddit subreddit search adapter
//!
//! Searches each configured subreddit in turn, pausing between requests to
//! stay inside Reddit's unauthenticated rate limits. A failing subreddit is
//! logged and skipped.

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use vigil_core::{truncate_chars, Article};

use crate::{SourceAdapter, SourceError, SourceQuery};

pub const REDDIT_URL: &str = "https://www.reddit.com";

/// Reddit asks API clients for a descriptive agent
pub const REDDIT_USER_AGENT: &str = "Vigil/0.1 (conflict escalation monitor)";

const POSTS_PER_SUBREDDIT: u32 = 25;
const TIMEOUT: Duration = Duration::from_secs(10);
const TITLE_MAX_CHARS: usize = 200;
const DESCRIPTION_MAX_CHARS: usize = 300;
/// Number of Reddit keywords combined into the search
pub const REDDIT_QUERY_TERMS: usize = 3;

#[derive(Debug, Deserialize)]
struct Listing {
    data: Option<ListingData>,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Post,
}

#[derive(Debug, Deserialize)]
struct Post {
    #[serde(default)]
    title: String,
    #[serde(default)]
    selftext: String,
    #[serde(default)]
    permalink: String,
    #[serde(default)]
    created_utc: f64,
}

/// Reddit search `t` parameter for a window in days
pub fn time_filter(days: u32) -> &'static str {
    match days {
        0..=1 => "day",
        2..=7 => "week",
        8..=30 => "month",
        _ => "year",
    }
}

/// Parse a subreddit search listing into articles sourced `r/<subreddit>`
pub fn parse_listing(body: &str, subreddit: &str) -> Result<Vec<Article>, SourceError> {
    let listing: Listing =
        serde_json::from_str(body).map_err(|e| SourceError::parse("reddit", e))?;
    let source_name = format!("r/{}", subreddit);

    Ok(listing
        .data
        .map(|d| d.children)
        .unwrap_or_default()
        .into_iter()
        .map(|child| {
            let post = child.data;
            let published_at = DateTime::from_timestamp(post.created_utc as i64, 0)
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_default();

            Article {
                title: truncate_chars(&post.title, TITLE_MAX_CHARS),
                description: truncate_chars(&post.selftext, DESCRIPTION_MAX_CHARS),
                content: post.selftext,
                source_name: source_name.clone(),
                published_at,
                language: "en".to_string(),
                url: format!("{}{}", REDDIT_URL, post.permalink),
            }
        })
        .collect())
}

pub struct RedditAdapter {
    client: Client,
    subreddits: Vec<String>,
    search: String,
    pacing: Duration,
    base_url: String,
}

impl RedditAdapter {
    /// Search `subreddits` for the first few `keywords`
    pub fn new(client: Client, subreddits: &[&str], keywords: &[&str]) -> Self {
        Self {
            client,
            subreddits: subreddits.iter().map(|s| s.to_string()).collect(),
            search: keywords
                .iter()
                .take(REDDIT_QUERY_TERMS)
                .copied()
                .collect::<Vec<_>>()
                .join(" OR "),
            pacing: Duration::from_secs(2),
            base_url: REDDIT_URL.to_string(),
        }
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn search_query(&self) -> &str {
        &self.search
    }

    async fn fetch_subreddit(&self, subreddit: &str, days: u32) -> Result<Vec<Article>, SourceError> {
        let url = format!("{}/r/{}/search.json", self.base_url, subreddit);
        let limit = POSTS_PER_SUBREDDIT.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", self.search.as_str()),
                ("restrict_sr", "true"),
                ("sort", "new"),
                ("t", time_filter(days)),
                ("limit", limit.as_str()),
            ])
            .header(reqwest::header::USER_AGENT, REDDIT_USER_AGENT)
            .timeout(TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Status {
                adapter: format!("reddit:r/{}", subreddit),
                status: response.status().as_u16(),
            });
        }

        parse_listing(&response.text().await?, subreddit)
    }
}

#[async_trait]
impl SourceAdapter for RedditAdapter {
    fn name(&self) -> String {
        "reddit".to_string()
    }

    async fn fetch(&self, query: &SourceQuery) -> Result<Vec<Article>, SourceError> {
        let mut posts = Vec::new();

        for (i, subreddit) in self.subreddits.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.pacing).await;
            }

            match self.fetch_subreddit(subreddit, query.days).await {
                Ok(found) => {
                    debug!("Reddit r/{}: found {} posts", subreddit, found.len());
                    posts.extend(found);
                }
                Err(e) => warn!("Reddit r/{} failed: {}", subreddit, e),
            }
        }

        debug!("Reddit: {} posts total", posts.len());
        Ok(posts)
    }
}
