//! Which adapters feed which scan

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use vigil_core::{TargetConfig, NOTAM_REGIONS};
use vigil_sources::{
    create_client, GdeltAdapter, HttpConfig, NewsApiAdapter, RedditAdapter, RssAdapter, SourceError,
};

use crate::{Aggregator, FlightScanner, NotamScanner, SharedAdapter};

/// Records requested per region in the NOTAM scan
pub const NOTAM_MAX_RECORDS: u32 = 25;

/// Source configuration
#[derive(Debug, Clone)]
pub struct SourceSettings {
    /// NewsAPI key; NewsAPI is skipped without one
    pub newsapi_key: Option<String>,
    pub http: HttpConfig,
    /// Pause between subreddit requests
    pub reddit_pacing: Duration,
    /// Maximum adapters in flight per scan
    pub max_concurrent: usize,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            newsapi_key: None,
            http: HttpConfig::default(),
            reddit_pacing: Duration::from_secs(2),
            max_concurrent: 4,
        }
    }
}

/// Builds adapter sets over one shared HTTP client
pub struct SourceCatalog {
    client: Client,
    settings: SourceSettings,
}

impl SourceCatalog {
    pub fn new(settings: SourceSettings) -> Result<Self, SourceError> {
        let client = create_client(&settings.http)?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &SourceSettings {
        &self.settings
    }

    pub fn aggregator(&self) -> Aggregator {
        Aggregator::new(self.settings.max_concurrent)
    }

    fn newsapi(&self) -> SharedAdapter {
        Arc::new(NewsApiAdapter::new(
            self.client.clone(),
            self.settings.newsapi_key.clone(),
        ))
    }

    /// NewsAPI, GDELT per language, Reddit, then the target's RSS feeds
    pub fn threat_adapters(&self, target: &TargetConfig) -> Vec<SharedAdapter> {
        let mut adapters = vec![self.newsapi()];

        for language in target.gdelt_languages {
            adapters.push(Arc::new(GdeltAdapter::new(self.client.clone(), language)));
        }

        adapters.push(Arc::new(
            RedditAdapter::new(self.client.clone(), target.subreddits, target.reddit_keywords)
                .with_pacing(self.settings.reddit_pacing),
        ));

        for &feed in target.rss_feeds {
            adapters.push(Arc::new(RssAdapter::new(self.client.clone(), feed)));
        }

        adapters
    }

    pub fn notam_scanner(&self) -> NotamScanner {
        let regions = NOTAM_REGIONS
            .iter()
            .map(|region| {
                let adapter: SharedAdapter = Arc::new(
                    GdeltAdapter::new(self.client.clone(), "eng").with_max_records(NOTAM_MAX_RECORDS),
                );
                (region, adapter)
            })
            .collect();
        NotamScanner::new(regions, self.settings.max_concurrent)
    }

    pub fn flight_scanner(&self) -> FlightScanner {
        let gdelt: SharedAdapter = Arc::new(GdeltAdapter::new(self.client.clone(), "eng"));
        FlightScanner::new(vec![self.newsapi(), gdelt], self.aggregator())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_core::find_target;

    fn catalog() -> SourceCatalog {
        SourceCatalog::new(SourceSettings::default()).unwrap()
    }

    #[test]
    fn test_threat_adapter_binding() {
        let names = |id: &str| -> Vec<String> {
            catalog()
                .threat_adapters(find_target(id).unwrap())
                .iter()
                .map(|a| a.name())
                .collect()
        };

        assert_eq!(
            names("ukraine"),
            vec![
                "newsapi", "gdelt:eng", "gdelt:rus", "gdelt:fra", "gdelt:ukr", "reddit",
                "rss:Kyiv Independent", "rss:Meduza", "rss:ISW",
            ]
        );
        assert_eq!(
            names("greenland"),
            vec!["newsapi", "gdelt:eng", "gdelt:rus", "gdelt:fra", "reddit", "rss:Arctic Today"]
        );
        assert_eq!(names("poland").len(), 5);
    }
}
