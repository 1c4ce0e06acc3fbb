//! News-derived NOTAM alerts
//!
//! There is no direct NOTAM feed; instead headlines about a region's airspace
//! are classified into alert types by keyword families, checked in priority
//! order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{truncate_chars, Article};

/// Maximum characters kept from a headline as the alert summary
const SUMMARY_MAX_CHARS: usize = 200;

/// A monitored flight information region group
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotamRegion {
    pub key: &'static str,
    pub display_name: &'static str,
    pub flag: &'static str,
    pub fir_codes: &'static [&'static str],
    pub icao_codes: &'static [&'static str],
}

impl NotamRegion {
    /// News query for airspace coverage of this region
    pub fn news_query(&self) -> String {
        let icao = self.icao_codes.iter().take(3).copied().collect::<Vec<_>>().join(" OR ");
        format!(
            "({name} NOTAM) OR ({name} airspace) OR ({icao} airspace)",
            name = self.display_name,
        )
    }
}

/// Regions scanned for airspace alerts
pub static NOTAM_REGIONS: &[NotamRegion] = &[
    NotamRegion {
        key: "ukraine",
        display_name: "Ukraine",
        flag: "🇺🇦",
        fir_codes: &["UKBV", "UKDV", "UKLV", "UKFV", "UKOV"],
        icao_codes: &["UKBB", "UKKK", "UKLL", "UKOO", "UKDD", "UKFF"],
    },
    NotamRegion {
        key: "poland",
        display_name: "Poland",
        flag: "🇵🇱",
        fir_codes: &["EPWW"],
        icao_codes: &["EPWA", "EPKK", "EPGD", "EPWR", "EPKT", "EPPO"],
    },
    NotamRegion {
        key: "russia_west",
        display_name: "Western Russia",
        flag: "🇷🇺",
        fir_codes: &["UUWV", "ULLL", "UMKK"],
        icao_codes: &["UUEE", "UUDD", "ULLI", "UMKK"],
    },
    NotamRegion {
        key: "baltic",
        display_name: "Baltic States",
        flag: "🇪🇺",
        fir_codes: &["EYVL", "EVRR", "EETT"],
        icao_codes: &["EYVI", "EVRA", "EETN"],
    },
    NotamRegion {
        key: "greenland",
        display_name: "Greenland",
        flag: "🇬🇱",
        fir_codes: &["BGGL"],
        icao_codes: &["BGBW", "BGSF", "BGKK"],
    },
    NotamRegion {
        key: "denmark",
        display_name: "Denmark",
        flag: "🇩🇰",
        fir_codes: &["EKDK"],
        icao_codes: &["EKCH", "EKBI", "EKAH"],
    },
    NotamRegion {
        key: "romania",
        display_name: "Romania",
        flag: "🇷🇴",
        fir_codes: &["LRBB"],
        icao_codes: &["LROP", "LRCL"],
    },
    NotamRegion {
        key: "moldova",
        display_name: "Moldova",
        flag: "🇲🇩",
        fir_codes: &["LUUU"],
        icao_codes: &["LUKK"],
    },
];

/// Alert severity colour, ordered most to least severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityColor {
    Red,
    Orange,
    Yellow,
    Purple,
    Blue,
    /// Anything unclassified sorts last
    Gray,
}

/// Kinds of airspace alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotamType {
    #[serde(rename = "Conflict Zone")]
    ConflictZone,
    #[serde(rename = "Airspace Closure")]
    AirspaceClosure,
    #[serde(rename = "Military Exercise")]
    MilitaryExercise,
    #[serde(rename = "GPS Interference")]
    GpsInterference,
    #[serde(rename = "Drone Activity")]
    DroneActivity,
    #[serde(rename = "Restricted Area")]
    RestrictedArea,
    #[serde(rename = "Airspace Notice")]
    AirspaceNotice,
}

impl NotamType {
    pub fn color(&self) -> SeverityColor {
        match self {
            NotamType::ConflictZone | NotamType::AirspaceClosure => SeverityColor::Red,
            NotamType::MilitaryExercise | NotamType::DroneActivity => SeverityColor::Orange,
            NotamType::GpsInterference | NotamType::RestrictedArea => SeverityColor::Yellow,
            NotamType::AirspaceNotice => SeverityColor::Blue,
        }
    }
}

/// Keyword families in priority order; matched against upper-cased text
const NOTAM_RULES: &[(NotamType, &[&str])] = &[
    (
        NotamType::ConflictZone,
        &["CONFLICT ZONE", "WAR ZONE", "HOSTILE", "ANTI-AIRCRAFT", "SAM "],
    ),
    (
        NotamType::AirspaceClosure,
        &["AIRSPACE CLOSED", "NO-FLY", "NO FLY", "PROHIBITED"],
    ),
    (
        NotamType::MilitaryExercise,
        &["MILITARY EXERCISE", "MIL EXERCISE", "LIVE FIRING", "MISSILE LAUNCH", "MISSILE TEST"],
    ),
    (
        NotamType::GpsInterference,
        &[
            "GPS JAMMING", "GPS INTERFERENCE", "GPS SPOOFING",
            "NAVIGATION WARNING", "NAVIGATION UNRELIABLE",
        ],
    ),
    (NotamType::DroneActivity, &["DRONE", "UAV", "UAS", "UNMANNED"]),
    (
        NotamType::RestrictedArea,
        &["RESTRICTED", "DANGER AREA", "TEMPORARY RESTRICTION"],
    ),
    (NotamType::AirspaceNotice, &["NOTAM", "AIRSPACE"]),
];

/// Classify a headline; `None` when it is not about airspace at all
pub fn classify_notam(text: &str) -> Option<NotamType> {
    let upper = text.to_uppercase();
    NOTAM_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| upper.contains(k)))
        .map(|(kind, _)| *kind)
}

/// An airspace alert for one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotamAlert {
    pub region: String,
    pub display_name: String,
    pub flag: String,
    #[serde(rename = "type")]
    pub notam_type: NotamType,
    pub severity_color: SeverityColor,
    pub summary: String,
    pub source: String,
    pub source_url: String,
    pub issued_at: String,
    pub icao_codes: Vec<String>,
    pub fir_codes: Vec<String>,
}

impl NotamAlert {
    /// Build an alert from a headline, if it classifies
    pub fn from_article(region: &NotamRegion, article: &Article) -> Option<Self> {
        let notam_type = classify_notam(&article.title)?;
        let source = if article.source_name.is_empty() {
            "GDELT".to_string()
        } else {
            article.source_name.clone()
        };

        Some(Self {
            region: region.key.to_string(),
            display_name: region.display_name.to_string(),
            flag: region.flag.to_string(),
            notam_type,
            severity_color: notam_type.color(),
            summary: truncate_chars(&article.title, SUMMARY_MAX_CHARS),
            source,
            source_url: article.url.clone(),
            issued_at: article.published_at.clone(),
            icao_codes: region.icao_codes.iter().map(|c| c.to_string()).collect(),
            fir_codes: region.fir_codes.iter().map(|c| c.to_string()).collect(),
        })
    }
}

/// All alerts from one scan, most severe first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotamReport {
    pub alerts: Vec<NotamAlert>,
    pub regions_scanned: Vec<String>,
    pub scanned_at: DateTime<Utc>,
}

impl NotamReport {
    /// Assemble a report, sorting alerts by severity (stable within a colour)
    pub fn new(
        mut alerts: Vec<NotamAlert>,
        regions_scanned: Vec<String>,
        scanned_at: DateTime<Utc>,
    ) -> Self {
        alerts.sort_by_key(|a| a.severity_color);
        Self {
            alerts,
            regions_scanned,
            scanned_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn region(key: &str) -> &'static NotamRegion {
        NOTAM_REGIONS.iter().find(|r| r.key == key).unwrap()
    }

    #[test]
    fn test_classify_priority() {
        assert_eq!(
            classify_notam("Airspace closed over conflict zone"),
            Some(NotamType::ConflictZone)
        );
        assert_eq!(
            classify_notam("Poland declares no-fly zone near border"),
            Some(NotamType::AirspaceClosure)
        );
        assert_eq!(
            classify_notam("GPS jamming reported over Baltic"),
            Some(NotamType::GpsInterference)
        );
        assert_eq!(
            classify_notam("Drone sightings close Copenhagen airport"),
            Some(NotamType::DroneActivity)
        );
        assert_eq!(
            classify_notam("New NOTAM issued for Kaliningrad"),
            Some(NotamType::AirspaceNotice)
        );
        assert_eq!(classify_notam("Election results announced"), None);
    }

    #[test]
    fn test_region_query() {
        let query = region("poland").news_query();
        assert_eq!(
            query,
            "(Poland NOTAM) OR (Poland airspace) OR (EPWA OR EPKK OR EPGD airspace)"
        );
    }

    #[test]
    fn test_alert_from_article() {
        let article = Article::builder("Romania scrambles jets after drone enters airspace")
            .source("reuters.com")
            .url("https://example.com/a")
            .published_at("2026-02-22T10:00:00Z")
            .build();

        let alert = NotamAlert::from_article(region("romania"), &article).unwrap();
        assert_eq!(alert.notam_type, NotamType::DroneActivity);
        assert_eq!(alert.severity_color, SeverityColor::Orange);
        assert_eq!(alert.icao_codes, vec!["LROP", "LRCL"]);
        assert_eq!(alert.source, "reuters.com");

        let unrelated = Article::builder("Football scores").build();
        assert!(NotamAlert::from_article(region("romania"), &unrelated).is_none());
    }

    #[test]
    fn test_report_sorted_by_severity() {
        let now = Utc.with_ymd_and_hms(2026, 2, 22, 12, 0, 0).unwrap();
        let make = |title: &str| {
            NotamAlert::from_article(region("baltic"), &Article::builder(title).build()).unwrap()
        };

        let report = NotamReport::new(
            vec![
                make("Baltic airspace notice"),
                make("GPS interference over Baltic"),
                make("Hostile activity near border"),
                make("Military exercise announced"),
            ],
            vec!["baltic".to_string()],
            now,
        );

        let colors: Vec<_> = report.alerts.iter().map(|a| a.severity_color).collect();
        assert_eq!(
            colors,
            vec![
                SeverityColor::Red,
                SeverityColor::Orange,
                SeverityColor::Yellow,
                SeverityColor::Blue
            ]
        );
    }

    #[test]
    fn test_alert_serializes_type_field() {
        let alert = NotamAlert::from_article(
            region("denmark"),
            &Article::builder("Airspace closed over Copenhagen").build(),
        )
        .unwrap();
        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["type"], "Airspace Closure");
        assert_eq!(json["severityColor"], "red");
        assert_eq!(json["displayName"], "Denmark");
    }
}
