//! The article record produced by every source adapter

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::normalize;

/// A single piece of open-source text: a news story, a Reddit post or an RSS item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub description: String,
    pub content: String,
    /// Outlet name, domain or `r/<subreddit>`; may be empty
    pub source_name: String,
    /// Raw publication timestamp as the source reported it; may be malformed
    pub published_at: String,
    /// Language tag (`en`, `ru`, `fr`, `uk`, ...)
    pub language: String,
    pub url: String,
}

impl Article {
    /// Start building an article with the given title
    pub fn builder(title: &str) -> ArticleBuilder {
        ArticleBuilder::new(title)
    }

    /// Title, description and content joined with spaces
    pub fn full_text(&self) -> String {
        format!("{} {} {}", self.title, self.description, self.content)
    }

    /// Normalized full text, ready for keyword matching
    pub fn normalized_text(&self) -> String {
        normalize(&self.full_text())
    }

    /// Parsed publication time, if the timestamp is well formed
    pub fn published(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.published_at)
    }

    /// Whether this article came from Reddit
    pub fn is_reddit(&self) -> bool {
        self.source_name.starts_with("r/")
    }
}

/// Parse the timestamp formats source adapters emit.
///
/// Accepts RFC 3339, RFC 2822, the GDELT compact form (`20260222T101500Z`) and
/// naive ISO-8601 date-times, which are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y%m%dT%H%M%SZ", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    None
}

/// Builder for articles, mostly used by adapters and tests
pub struct ArticleBuilder {
    article: Article,
}

impl ArticleBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            article: Article {
                title: title.to_string(),
                description: String::new(),
                content: String::new(),
                source_name: String::new(),
                published_at: String::new(),
                language: "en".to_string(),
                url: String::new(),
            },
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.article.description = description.to_string();
        self
    }

    pub fn content(mut self, content: &str) -> Self {
        self.article.content = content.to_string();
        self
    }

    pub fn source(mut self, source_name: &str) -> Self {
        self.article.source_name = source_name.to_string();
        self
    }

    pub fn published_at(mut self, published_at: &str) -> Self {
        self.article.published_at = published_at.to_string();
        self
    }

    pub fn published(self, when: DateTime<Utc>) -> Self {
        self.published_at(&when.to_rfc3339())
    }

    pub fn language(mut self, language: &str) -> Self {
        self.article.language = language.to_string();
        self
    }

    pub fn url(mut self, url: &str) -> Self {
        self.article.url = url.to_string();
        self
    }

    pub fn build(self) -> Article {
        self.article
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_timestamp("2026-02-22T10:00:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 2, 22, 10, 0, 0).unwrap());

        let dt = parse_timestamp("2026-02-22T12:00:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 2, 22, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rss_and_gdelt_forms() {
        let rss = parse_timestamp("Sun, 22 Feb 2026 10:00:00 +0000").unwrap();
        let gdelt = parse_timestamp("20260222T100000Z").unwrap();
        assert_eq!(rss, gdelt);
    }

    #[test]
    fn test_parse_naive_as_utc() {
        let dt = parse_timestamp("2026-02-22T10:00:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 2, 22, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_malformed_timestamp() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday-ish").is_none());
        assert!(parse_timestamp("2026-13-45").is_none());
    }

    #[test]
    fn test_builder_and_full_text() {
        let article = Article::builder("Drone sighted")
            .description("over Warsaw")
            .content("Officials confirmed")
            .source("r/poland")
            .build();

        assert_eq!(article.full_text(), "Drone sighted over Warsaw Officials confirmed");
        assert!(article.is_reddit());
        assert_eq!(article.language, "en");
    }
}
