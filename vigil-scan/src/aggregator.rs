//! Article aggregation across source adapters
//!
//! Adapters run concurrently but results come back in adapter order, so the
//! article list (and everything scored from it) is deterministic for a fixed
//! set of responses. A failing adapter contributes nothing.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use vigil_core::{dedupe_by_url, Article};
use vigil_sources::{SourceAdapter, SourceQuery};

pub type SharedAdapter = Arc<dyn SourceAdapter>;

/// One adapter's articles; failures become an empty list
async fn fetch_one(adapter: SharedAdapter, query: SourceQuery) -> Vec<Article> {
    match adapter.fetch(&query).await {
        Ok(articles) => {
            debug!("{}: {} articles", adapter.name(), articles.len());
            articles
        }
        Err(e) => {
            warn!("{} failed: {}", adapter.name(), e);
            Vec::new()
        }
    }
}

#[derive(Debug, Clone)]
pub struct Aggregator {
    /// Maximum adapters in flight at once
    pub max_concurrent: usize,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self { max_concurrent: 4 }
    }
}

impl Aggregator {
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Concatenate every adapter's articles, in adapter order
    pub async fn collect(&self, adapters: &[SharedAdapter], query: &SourceQuery) -> Vec<Article> {
        let fetches: Vec<_> = adapters
            .iter()
            .map(|adapter| fetch_one(adapter.clone(), query.clone()))
            .collect();

        let batches: Vec<Vec<Article>> = stream::iter(fetches)
            .buffered(self.max_concurrent)
            .collect()
            .await;

        batches.into_iter().flatten().collect()
    }

    /// Like [`collect`](Self::collect), dropping repeated URLs
    pub async fn collect_unique(&self, adapters: &[SharedAdapter], query: &SourceQuery) -> Vec<Article> {
        dedupe_by_url(self.collect(adapters, query).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingAdapter, FixedAdapter};
    use std::time::Duration;

    fn assert_send<T: Send>(_: T) {}

    #[test]
    fn test_collect_future_is_send() {
        let adapters: Vec<SharedAdapter> = vec![Arc::new(FixedAdapter::new("one", &["a"]))];
        let query = SourceQuery::new("q", 7);
        assert_send(Aggregator::default().collect(&adapters, &query));
    }

    #[tokio::test]
    async fn test_collect_preserves_adapter_order() {
        let adapters: Vec<SharedAdapter> = vec![
            Arc::new(FixedAdapter::new("slow", &["a1", "a2"]).with_delay(Duration::from_millis(30))),
            Arc::new(FixedAdapter::new("fast", &["b1"])),
        ];

        let articles = Aggregator::default()
            .collect(&adapters, &SourceQuery::new("q", 7))
            .await;

        let titles: Vec<_> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["a1", "a2", "b1"]);
    }

    #[tokio::test]
    async fn test_failures_contribute_nothing() {
        let adapters: Vec<SharedAdapter> = vec![
            Arc::new(FailingAdapter::new("broken")),
            Arc::new(FixedAdapter::new("ok", &["x"])),
        ];

        let articles = Aggregator::new(2)
            .collect(&adapters, &SourceQuery::new("q", 7))
            .await;
        assert_eq!(articles.len(), 1);
    }

    #[tokio::test]
    async fn test_no_dedupe_for_scoring_but_unique_variant() {
        let adapters: Vec<SharedAdapter> = vec![
            Arc::new(FixedAdapter::new("one", &["same"]).with_url("https://x/1")),
            Arc::new(FixedAdapter::new("two", &["same"]).with_url("https://x/1")),
        ];
        let query = SourceQuery::new("q", 7);
        let aggregator = Aggregator::default();

        assert_eq!(aggregator.collect(&adapters, &query).await.len(), 2);
        assert_eq!(aggregator.collect_unique(&adapters, &query).await.len(), 1);
    }
}
