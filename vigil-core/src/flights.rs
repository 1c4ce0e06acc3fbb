//! Flight-disruption detection
//!
//! An article yields a disruption when its title or description names a
//! European airline together with a disruption keyword.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{normalize, Article};

/// Airlines watched for disruptions, in match order
pub static EUROPEAN_AIRLINES: &[&str] = &[
    "Lufthansa", "Air France", "British Airways", "KLM", "Ryanair",
    "Wizz Air", "EasyJet", "LOT Polish", "SAS", "Finnair",
    "Norwegian Air", "Aeroflot", "Turkish Airlines", "Swiss Air",
    "Austrian Airlines", "Brussels Airlines", "TAP Portugal",
    "Icelandair", "Air Baltic", "Condor",
];

static DISRUPTION_KEYWORDS: &[&str] = &[
    "cancel", "suspend", "halt", "ground", "divert",
    "disruption", "delay", "reroute", "avoid airspace",
    "close airspace", "banned from", "restricted",
];

static SUSPENSION_KEYWORDS: &[&str] = &["suspend", "halt", "cancel", "ground"];

/// Destinations in match order; the first hit names the route
pub static EUROPEAN_DESTINATIONS: &[&str] = &[
    "Ukraine", "Russia", "Moscow", "Kyiv", "Kiev", "Warsaw",
    "Minsk", "Belarus", "Crimea", "Moldova", "Chisinau",
    "Kaliningrad", "Greenland", "Iceland", "Arctic",
    "Baltic", "Estonia", "Latvia", "Lithuania",
    "Romania", "Bucharest", "Poland", "Helsinki",
    "St. Petersburg", "Saint Petersburg",
];

pub const UNSPECIFIED_DESTINATION: &str = "Unspecified European route";

/// Reason families in priority order
static REASON_RULES: &[(&str, &[&str])] = &[
    ("Active conflict zone", &["war", "conflict", "military", "combat"]),
    ("Airspace closure", &["airspace closed", "airspace closure", "no-fly"]),
    ("Drone activity", &["drone", "uav", "unmanned"]),
    ("Sanctions/restrictions", &["sanction", "banned", "restriction"]),
    ("GPS interference", &["gps", "jamming", "interference"]),
    ("Security concerns", &["security", "threat", "safety"]),
];

pub const UNSPECIFIED_REASON: &str = "Unspecified disruption";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisruptionStatus {
    Suspended,
    Disrupted,
}

/// A detected airline disruption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDisruption {
    pub airline: String,
    pub status: DisruptionStatus,
    pub destination: String,
    pub reason: String,
    pub date: String,
    pub source: String,
    pub source_url: String,
    pub title: String,
}

/// Result of a standalone flight scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightReport {
    pub disruptions: Vec<FlightDisruption>,
    pub articles_scanned: usize,
    pub scanned_at: DateTime<Utc>,
}

fn first_match<'a>(text: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .find(|c| text.contains(&normalize(c)))
        .copied()
}

/// First listed destination mentioned in already-normalized text
pub fn extract_destination(text: &str) -> &'static str {
    first_match(text, EUROPEAN_DESTINATIONS).unwrap_or(UNSPECIFIED_DESTINATION)
}

/// Disruption reason for already-normalized text
pub fn extract_reason(text: &str) -> &'static str {
    REASON_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(reason, _)| *reason)
        .unwrap_or(UNSPECIFIED_REASON)
}

/// At most one disruption per article, for the first airline mentioned
pub fn detect_disruption(article: &Article) -> Option<FlightDisruption> {
    let text = normalize(&format!("{} {}", article.title, article.description));

    let airline = first_match(&text, EUROPEAN_AIRLINES)?;
    if !DISRUPTION_KEYWORDS.iter().any(|k| text.contains(k)) {
        return None;
    }

    let status = if SUSPENSION_KEYWORDS.iter().any(|k| text.contains(k)) {
        DisruptionStatus::Suspended
    } else {
        DisruptionStatus::Disrupted
    };

    let source = if article.source_name.is_empty() {
        "Unknown".to_string()
    } else {
        article.source_name.clone()
    };

    Some(FlightDisruption {
        airline: airline.to_string(),
        status,
        destination: extract_destination(&text).to_string(),
        reason: extract_reason(&text).to_string(),
        date: article.published_at.clone(),
        source,
        source_url: article.url.clone(),
        title: article.title.clone(),
    })
}

/// Detect disruptions across articles, keeping the first per (airline, destination)
pub fn scan_disruptions(articles: &[Article]) -> Vec<FlightDisruption> {
    let mut seen = HashSet::new();
    articles
        .iter()
        .filter_map(detect_disruption)
        .filter(|d| seen.insert((d.airline.clone(), d.destination.clone())))
        .collect()
}

/// Drop articles whose URL was already seen; articles without a URL are kept
pub fn dedupe_by_url(articles: Vec<Article>) -> Vec<Article> {
    let mut seen = HashSet::new();
    articles
        .into_iter()
        .filter(|a| a.url.is_empty() || seen.insert(a.url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_suspension() {
        let article = Article::builder("Lufthansa suspends flights to Moscow amid war")
            .source("Reuters")
            .url("https://example.com/lh")
            .build();

        let d = detect_disruption(&article).unwrap();
        assert_eq!(d.airline, "Lufthansa");
        assert_eq!(d.status, DisruptionStatus::Suspended);
        assert_eq!(d.destination, "Moscow");
        assert_eq!(d.reason, "Active conflict zone");
        assert_eq!(d.source_url, "https://example.com/lh");
    }

    #[test]
    fn test_disrupted_with_fallbacks() {
        let article = Article::builder("Finnair flights delayed")
            .description("Passengers report long queues")
            .build();

        let d = detect_disruption(&article).unwrap();
        assert_eq!(d.status, DisruptionStatus::Disrupted);
        assert_eq!(d.destination, UNSPECIFIED_DESTINATION);
        assert_eq!(d.reason, UNSPECIFIED_REASON);
        assert_eq!(d.source, "Unknown");
    }

    #[test]
    fn test_requires_airline_and_keyword() {
        let no_keyword = Article::builder("Ryanair posts record profits").build();
        assert!(detect_disruption(&no_keyword).is_none());

        let no_airline = Article::builder("Flights cancelled over Warsaw").build();
        assert!(detect_disruption(&no_airline).is_none());
    }

    #[test]
    fn test_reason_priority() {
        assert_eq!(extract_reason("drone sightings and gps jamming"), "Drone activity");
        assert_eq!(extract_reason("airspace closed after drone"), "Airspace closure");
        assert_eq!(extract_reason("new sanctions imposed"), "Sanctions/restrictions");
    }

    #[test]
    fn test_scan_dedupes_airline_destination() {
        let articles = vec![
            Article::builder("Air Baltic cancels Kyiv route").url("a").build(),
            Article::builder("Air Baltic halts Kyiv service again").url("b").build(),
            Article::builder("Air Baltic diverts flight from Minsk").url("c").build(),
        ];

        let disruptions = scan_disruptions(&articles);
        assert_eq!(disruptions.len(), 2);
        assert_eq!(disruptions[0].source_url, "a");
        assert_eq!(disruptions[1].destination, "Minsk");
    }

    #[test]
    fn test_dedupe_by_url_keeps_empty() {
        let articles = vec![
            Article::builder("one").url("https://x/1").build(),
            Article::builder("two").url("https://x/1").build(),
            Article::builder("three").build(),
            Article::builder("four").build(),
        ];

        let unique = dedupe_by_url(articles);
        let titles: Vec<_> = unique.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["one", "three", "four"]);
    }
}
