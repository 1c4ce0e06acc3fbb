//! Scanner backed by the live source adapters

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use vigil_core::{find_target, FlightReport, NotamReport};
use vigil_sources::SourceQuery;

use crate::{
    build_report, validate_window, ScanError, Scanner, SharedScanner, SourceCatalog,
    SourceSettings, ThreatReport,
};

pub struct LiveScanner {
    catalog: SourceCatalog,
}

impl LiveScanner {
    pub fn new(settings: SourceSettings) -> Result<Self, ScanError> {
        Ok(Self {
            catalog: SourceCatalog::new(settings)?,
        })
    }

    pub fn shared(settings: SourceSettings) -> Result<SharedScanner, ScanError> {
        Ok(Arc::new(Self::new(settings)?))
    }
}

#[async_trait]
impl Scanner for LiveScanner {
    async fn scan_threat(&self, target: &str, days: u32) -> Result<ThreatReport, ScanError> {
        let config = find_target(target).ok_or_else(|| ScanError::UnknownTarget(target.to_string()))?;
        let days = validate_window(days)?;

        info!("Scanning {} over {} days", config.id, days);

        let adapters = self.catalog.threat_adapters(config);
        let query = SourceQuery::new(config.news_query(), days);
        let articles = self.catalog.aggregator().collect(&adapters, &query).await;

        let report = build_report(config, days, &articles, Utc::now());
        info!(
            "{}: probability {}% from {} articles ({:?} momentum)",
            config.id,
            report.assessment.probability,
            report.total_articles,
            report.assessment.momentum
        );
        Ok(report)
    }

    async fn scan_notams(&self) -> Result<NotamReport, ScanError> {
        Ok(self.catalog.notam_scanner().scan(Utc::now()).await)
    }

    async fn scan_flights(&self) -> Result<FlightReport, ScanError> {
        Ok(self.catalog.flight_scanner().scan(Utc::now()).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send<T: Send>(_: T) {}

    #[test]
    fn test_scan_futures_are_send() {
        let scanner = LiveScanner::new(SourceSettings::default()).unwrap();
        assert_send(scanner.scan_threat("ukraine", 7));
        assert_send(scanner.scan_notams());
        assert_send(scanner.scan_flights());
        assert_send(scanner.catalog.notam_scanner().scan(Utc::now()));
    }

    #[test]
    fn test_usable_as_shared_scanner() {
        let shared: SharedScanner = LiveScanner::shared(SourceSettings::default()).unwrap();
        assert_send(shared.clone());
        assert_send(shared.scan_notams());
    }

    #[tokio::test]
    async fn test_rejects_before_any_fetch() {
        let scanner = LiveScanner::new(SourceSettings::default()).unwrap();

        assert!(matches!(
            scanner.scan_threat("atlantis", 7).await,
            Err(ScanError::UnknownTarget(_))
        ));
        assert!(matches!(
            scanner.scan_threat("poland", 0).await,
            Err(ScanError::InvalidWindow(0))
        ));
    }
}
