//! Fake adapters for scanner tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use vigil_core::Article;
use vigil_sources::{SourceAdapter, SourceError, SourceQuery};

/// Returns a fixed article list and records the queries it saw
pub struct FixedAdapter {
    name: String,
    articles: Vec<Article>,
    delay: Duration,
    pub calls: Arc<AtomicUsize>,
    pub queries: Arc<Mutex<Vec<SourceQuery>>>,
}

impl FixedAdapter {
    pub fn new(name: &str, titles: &[&str]) -> Self {
        let articles = titles
            .iter()
            .map(|t| Article::builder(t).source(name).build())
            .collect();
        Self::from_articles(name, articles)
    }

    pub fn from_articles(name: &str, articles: Vec<Article>) -> Self {
        Self {
            name: name.to_string(),
            articles,
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_url(mut self, url: &str) -> Self {
        for article in &mut self.articles {
            article.url = url.to_string();
        }
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl SourceAdapter for FixedAdapter {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn fetch(&self, query: &SourceQuery) -> Result<Vec<Article>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().push(query.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.articles.clone())
    }
}

/// Always fails with an HTTP status error
pub struct FailingAdapter {
    name: String,
}

impl FailingAdapter {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl SourceAdapter for FailingAdapter {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn fetch(&self, _query: &SourceQuery) -> Result<Vec<Article>, SourceError> {
        Err(SourceError::Status {
            adapter: self.name.clone(),
            status: 503,
        })
    }
}
