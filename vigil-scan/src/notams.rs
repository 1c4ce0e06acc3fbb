//! NOTAM scan across all monitored regions

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use vigil_core::{NotamAlert, NotamRegion, NotamReport};
use vigil_sources::SourceQuery;

use crate::SharedAdapter;

/// Days of coverage searched per region
pub const NOTAM_WINDOW_DAYS: u32 = 7;

/// Classified alerts for one region; a failed fetch yields none
async fn scan_region(region: &'static NotamRegion, adapter: SharedAdapter) -> Vec<NotamAlert> {
    let query = SourceQuery::new(region.news_query(), NOTAM_WINDOW_DAYS);
    match adapter.fetch(&query).await {
        Ok(articles) => {
            let alerts: Vec<_> = articles
                .iter()
                .filter_map(|a| NotamAlert::from_article(region, a))
                .collect();
            debug!("NOTAMs for {}: {} alerts", region.display_name, alerts.len());
            alerts
        }
        Err(e) => {
            warn!("NOTAM scan failed for {}: {}", region.key, e);
            Vec::new()
        }
    }
}

/// Searches each region's airspace news and classifies the headlines
pub struct NotamScanner {
    regions: Vec<(&'static NotamRegion, SharedAdapter)>,
    max_concurrent: usize,
}

impl NotamScanner {
    pub fn new(regions: Vec<(&'static NotamRegion, SharedAdapter)>, max_concurrent: usize) -> Self {
        Self {
            regions,
            max_concurrent: max_concurrent.max(1),
        }
    }

    pub async fn scan(&self, now: DateTime<Utc>) -> NotamReport {
        let scans: Vec<_> = self
            .regions
            .iter()
            .map(|(region, adapter)| scan_region(*region, adapter.clone()))
            .collect();

        let per_region: Vec<Vec<NotamAlert>> = stream::iter(scans)
            .buffered(self.max_concurrent)
            .collect()
            .await;

        let alerts: Vec<_> = per_region.into_iter().flatten().collect();
        info!("NOTAM scan: {} alerts across {} regions", alerts.len(), self.regions.len());

        NotamReport::new(
            alerts,
            self.regions.iter().map(|(r, _)| r.key.to_string()).collect(),
            now,
        )
    }
}
