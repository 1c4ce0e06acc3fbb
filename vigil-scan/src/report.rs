//! Threat report assembly
//!
//! Wraps the scoring engine's assessment with everything the dashboard shows
//! alongside it: casualty figures, flight disruptions and per-language samples.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vigil_core::{
    extract_casualties, scan_disruptions, score, Article, CasualtyReport, FlightDisruption,
    TargetConfig, ThreatAssessment,
};

/// Articles kept per sample bucket
pub const SAMPLE_SIZE: usize = 20;

/// Per-language article samples
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleSamples {
    pub en: Vec<Article>,
    pub ru: Vec<Article>,
    pub fr: Vec<Article>,
    pub uk: Vec<Article>,
    pub reddit: Vec<Article>,
}

impl ArticleSamples {
    pub fn from_articles(articles: &[Article]) -> Self {
        let sample = |keep: &dyn Fn(&Article) -> bool| -> Vec<Article> {
            articles.iter().filter(|a| keep(a)).take(SAMPLE_SIZE).cloned().collect()
        };

        Self {
            en: sample(&|a| a.language == "en"),
            ru: sample(&|a| a.language == "ru"),
            fr: sample(&|a| a.language == "fr"),
            uk: sample(&|a| a.language == "uk"),
            reddit: sample(&|a| a.is_reddit()),
        }
    }
}

/// The cached payload for one target and window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatReport {
    pub target: String,
    pub window_days: u32,
    #[serde(flatten)]
    pub assessment: ThreatAssessment,
    pub total_articles: usize,
    pub flight_disruptions: Vec<FlightDisruption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub casualties: Option<CasualtyReport>,
    pub articles: ArticleSamples,
    pub target_keywords: Vec<String>,
    pub scanned_at: DateTime<Utc>,
}

/// Score `articles` for `target` and assemble the report
pub fn build_report(
    target: &TargetConfig,
    window_days: u32,
    articles: &[Article],
    now: DateTime<Utc>,
) -> ThreatReport {
    let assessment = score(articles, target, window_days, now);
    let casualties = target.tracks_casualties.then(|| extract_casualties(articles));

    ThreatReport {
        target: target.id.to_string(),
        window_days,
        assessment,
        total_articles: articles.len(),
        flight_disruptions: scan_disruptions(articles),
        casualties,
        articles: ArticleSamples::from_articles(articles),
        target_keywords: target.keywords.iter().map(|k| k.to_string()).collect(),
        scanned_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use vigil_core::find_target;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 22, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_report() {
        let poland = find_target("poland").unwrap();
        let report = build_report(poland, 7, &[], now());

        assert_eq!(report.assessment.probability, 30);
        assert_eq!(report.total_articles, 0);
        assert!(report.casualties.is_none());
        assert!(report.flight_disruptions.is_empty());
        assert_eq!(report.target_keywords.len(), poland.keywords.len());
    }

    #[test]
    fn test_casualties_only_for_tracked_targets() {
        let articles = vec![Article::builder("At least 4 people killed in Kharkiv shelling")
            .source("Reuters")
            .published(now())
            .build()];

        let ukraine = build_report(find_target("ukraine").unwrap(), 7, &articles, now());
        assert_eq!(ukraine.casualties.as_ref().unwrap().deaths, 4);

        let greenland = build_report(find_target("greenland").unwrap(), 7, &articles, now());
        assert!(greenland.casualties.is_none());
    }

    #[test]
    fn test_samples_split_by_language() {
        let mut articles: Vec<Article> = (0..25)
            .map(|i| Article::builder(&format!("en {}", i)).build())
            .collect();
        articles.push(Article::builder("ru").language("ru").build());
        articles.push(Article::builder("post").source("r/poland").build());

        let samples = ArticleSamples::from_articles(&articles);
        assert_eq!(samples.en.len(), SAMPLE_SIZE);
        assert_eq!(samples.ru.len(), 1);
        assert!(samples.uk.is_empty());
        assert_eq!(samples.reddit.len(), 1);
    }

    #[test]
    fn test_report_json_shape() {
        let russia = find_target("russia").unwrap();
        let articles = vec![Article::builder("Aeroflot flights to Kaliningrad cancelled").build()];
        let report = build_report(russia, 7, &articles, now());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["target"], "russia");
        assert_eq!(json["windowDays"], 7);
        assert!(json["probability"].is_i64());
        assert!(json["topContributors"].is_array());
        assert_eq!(json["flightDisruptions"][0]["airline"], "Aeroflot");
        assert_eq!(json["casualties"]["deaths"], 0);
    }
}
