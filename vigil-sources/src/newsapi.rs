//! NewsAPI `/v2/everything` adapter (English only)

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use vigil_core::Article;

use crate::{SourceAdapter, SourceError, SourceQuery};

pub const NEWSAPI_URL: &str = "https://newsapi.org/v2/everything";

const PAGE_SIZE: u32 = 100;
const TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiArticle {
    source: Option<NewsApiSource>,
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    url: Option<String>,
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiSource {
    name: Option<String>,
}

/// Parse an `/everything` response body into articles tagged `en`
pub fn parse_response(body: &str) -> Result<Vec<Article>, SourceError> {
    let response: NewsApiResponse =
        serde_json::from_str(body).map_err(|e| SourceError::parse("newsapi", e))?;

    Ok(response
        .articles
        .into_iter()
        .map(|a| Article {
            title: a.title.unwrap_or_default(),
            description: a.description.unwrap_or_default(),
            content: a.content.unwrap_or_default(),
            source_name: a.source.and_then(|s| s.name).unwrap_or_default(),
            published_at: a.published_at.unwrap_or_default(),
            language: "en".to_string(),
            url: a.url.unwrap_or_default(),
        })
        .collect())
}

pub struct NewsApiAdapter {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl NewsApiAdapter {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: NEWSAPI_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl SourceAdapter for NewsApiAdapter {
    fn name(&self) -> String {
        "newsapi".to_string()
    }

    async fn fetch(&self, query: &SourceQuery) -> Result<Vec<Article>, SourceError> {
        let Some(api_key) = &self.api_key else {
            debug!("NewsAPI: no API key configured, skipping");
            return Ok(Vec::new());
        };

        let from = (Utc::now() - ChronoDuration::days(i64::from(query.days)))
            .format("%Y-%m-%d")
            .to_string();
        let page_size = PAGE_SIZE.to_string();

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", query.query.as_str()),
                ("from", from.as_str()),
                ("sortBy", "publishedAt"),
                ("language", "en"),
                ("apiKey", api_key.as_str()),
                ("pageSize", page_size.as_str()),
            ])
            .timeout(TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Status {
                adapter: self.name(),
                status: response.status().as_u16(),
            });
        }

        let articles = parse_response(&response.text().await?)?;
        debug!("NewsAPI: fetched {} articles", articles.len());
        Ok(articles)
    }
}
