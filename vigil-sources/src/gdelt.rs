//! GDELT DOC 2.0 article-list adapter

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use vigil_core::Article;

use crate::{SourceAdapter, SourceError, SourceQuery};

pub const GDELT_URL: &str = "http://api.gdeltproject.org/api/v2/doc/doc";

pub const DEFAULT_MAX_RECORDS: u32 = 75;
const TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct GdeltResponse {
    #[serde(default)]
    articles: Vec<GdeltArticle>,
}

#[derive(Debug, Deserialize)]
struct GdeltArticle {
    #[serde(default)]
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    seendate: String,
    domain: Option<String>,
}

/// Map a GDELT `sourcelang` code to the article language tag
pub fn language_tag(code: &str) -> &'static str {
    match code {
        "eng" => "en",
        "rus" => "ru",
        "fra" => "fr",
        "ukr" => "uk",
        "pol" => "pl",
        "dan" => "da",
        "deu" => "de",
        "ara" => "ar",
        _ => "en",
    }
}

/// GDELT needs disjunctions parenthesised
pub fn wrap_query(query: &str) -> String {
    if query.contains(" OR ") {
        format!("({})", query)
    } else {
        query.to_string()
    }
}

/// Convert the compact `seendate` form to RFC 3339, passing anything else through
fn convert_seendate(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, "%Y%m%dT%H%M%SZ")
        .map(|naive| naive.and_utc().to_rfc3339())
        .unwrap_or_else(|_| raw.to_string())
}

/// Parse an `artlist` JSON body into articles in the given language
pub fn parse_response(body: &str, language_code: &str) -> Result<Vec<Article>, SourceError> {
    let response: GdeltResponse =
        serde_json::from_str(body).map_err(|e| SourceError::parse("gdelt", e))?;
    let language = language_tag(language_code);

    Ok(response
        .articles
        .into_iter()
        .map(|a| Article {
            description: a.title.clone(),
            content: a.title.clone(),
            title: a.title,
            source_name: a
                .domain
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "GDELT".to_string()),
            published_at: convert_seendate(&a.seendate),
            language: language.to_string(),
            url: a.url,
        })
        .collect())
}

pub struct GdeltAdapter {
    client: Client,
    language: String,
    max_records: u32,
    base_url: String,
}

impl GdeltAdapter {
    pub fn new(client: Client, language: &str) -> Self {
        Self {
            client,
            language: language.to_string(),
            max_records: DEFAULT_MAX_RECORDS,
            base_url: GDELT_URL.to_string(),
        }
    }

    pub fn with_max_records(mut self, max_records: u32) -> Self {
        self.max_records = max_records;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

#[async_trait]
impl SourceAdapter for GdeltAdapter {
    fn name(&self) -> String {
        format!("gdelt:{}", self.language)
    }

    async fn fetch(&self, query: &SourceQuery) -> Result<Vec<Article>, SourceError> {
        let wrapped = wrap_query(&query.query);
        let max_records = self.max_records.to_string();
        let timespan = format!("{}d", query.days);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("query", wrapped.as_str()),
                ("mode", "artlist"),
                ("maxrecords", max_records.as_str()),
                ("timespan", timespan.as_str()),
                ("format", "json"),
                ("sourcelang", self.language.as_str()),
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

        let articles = parse_response(&response.text().await?, &self.language)?;
        debug!("GDELT {}: fetched {} articles", self.language, articles.len());
        Ok(articles)
    }
}
