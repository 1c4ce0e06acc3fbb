//! Standalone flight-disruption scan

use chrono::{DateTime, Utc};
use tracing::info;

use vigil_core::{scan_disruptions, FlightReport};
use vigil_sources::SourceQuery;

use crate::{Aggregator, SharedAdapter};

pub const FLIGHT_QUERY: &str = "Europe flight cancel OR suspend OR airspace closed OR divert";
pub const FLIGHT_WINDOW_DAYS: u32 = 3;

pub struct FlightScanner {
    adapters: Vec<SharedAdapter>,
    aggregator: Aggregator,
}

impl FlightScanner {
    pub fn new(adapters: Vec<SharedAdapter>, aggregator: Aggregator) -> Self {
        Self { adapters, aggregator }
    }

    pub async fn scan(&self, now: DateTime<Utc>) -> FlightReport {
        let query = SourceQuery::new(FLIGHT_QUERY, FLIGHT_WINDOW_DAYS);
        let articles = self.aggregator.collect_unique(&self.adapters, &query).await;
        let disruptions = scan_disruptions(&articles);

        info!(
            "Flight scan: {} disruptions from {} articles",
            disruptions.len(),
            articles.len()
        );

        FlightReport {
            disruptions,
            articles_scanned: articles.len(),
            scanned_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixedAdapter;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_scan_dedupes_urls_before_detection() {
        let news = FixedAdapter::new("newsapi", &["Wizz Air suspends Moldova flights"])
            .with_url("https://example.com/wizz");
        let queries = news.queries.clone();
        let gdelt = FixedAdapter::new("gdelt", &["Wizz Air suspends Moldova flights"])
            .with_url("https://example.com/wizz");

        let adapters: Vec<SharedAdapter> = vec![Arc::new(news), Arc::new(gdelt)];
        let scanner = FlightScanner::new(adapters, Aggregator::default());
        let report = scanner.scan(Utc::now()).await;

        assert_eq!(report.articles_scanned, 1);
        assert_eq!(report.disruptions.len(), 1);
        assert_eq!(report.disruptions[0].destination, "Moldova");

        let seen = queries.lock();
        assert_eq!(seen[0], SourceQuery::new(FLIGHT_QUERY, FLIGHT_WINDOW_DAYS));
    }
}
