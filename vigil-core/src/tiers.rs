//! Source credibility tiers and keyword severity tiers
//!
//! Both tables are explicit ordered slices: lookups walk them front to back
//! and the first hit wins, so priority is fixed by position.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::text::{contains_any, normalize, normalize_all};

/// Weight for a non-empty source name that matches no tier
pub const UNKNOWN_SOURCE_WEIGHT: f64 = 0.5;

/// Weight for an article with no source name at all
pub const MISSING_SOURCE_WEIGHT: f64 = 0.3;

/// Multiplier for an article that matches no severity tier
pub const NEUTRAL_SEVERITY: f64 = 1.0;

/// A credibility tier: a weight plus the outlet-name fragments that earn it
#[derive(Debug, Clone, Serialize)]
pub struct SourceTier {
    pub name: &'static str,
    pub weight: f64,
    pub sources: &'static [&'static str],
}

/// Source tiers in priority order
pub static SOURCE_TIERS: &[SourceTier] = &[
    SourceTier {
        name: "premium",
        weight: 1.0,
        sources: &[
            "The New York Times", "The Washington Post", "Reuters",
            "Associated Press", "AP News", "BBC News", "The Guardian",
            "Financial Times", "Wall Street Journal", "The Economist",
            "Le Monde", "Der Spiegel", "Frankfurter Allgemeine",
        ],
    },
    SourceTier {
        name: "regional",
        weight: 0.85,
        sources: &[
            "Ukrainska Pravda", "Kyiv Independent", "Kyiv Post",
            "Meduza", "Moscow Times", "TASS", "Interfax",
            "Gazeta Wyborcza", "TVN24", "Polsat News",
            "Arctic Today", "Sermitsiaq", "KNR Greenland",
            "DR (Denmark)", "Berlingske", "Politiken",
            "France 24", "RFI", "Deutsche Welle",
            "Euronews", "EUobserver", "Politico Europe",
            "The Barents Observer", "High North News",
        ],
    },
    SourceTier {
        name: "think_tank",
        weight: 0.9,
        sources: &[
            "War on the Rocks", "ISW", "RUSI", "IISS",
            "Carnegie", "Chatham House", "CSIS", "RAND",
            "Atlantic Council", "Brookings", "Council on Foreign Relations",
        ],
    },
    SourceTier {
        name: "standard",
        weight: 0.6,
        sources: &[
            "CNN", "MSNBC", "Fox News", "NBC News", "CBS News",
            "ABC News", "Bloomberg", "CNBC", "Sky News",
            "Al Jazeera", "RT",
        ],
    },
    SourceTier {
        name: "gdelt",
        weight: 0.4,
        sources: &["GDELT"],
    },
    SourceTier {
        name: "social",
        weight: 0.3,
        sources: &["Reddit", "r/"],
    },
];

static NORMALIZED_SOURCE_TIERS: LazyLock<Vec<(f64, Vec<String>)>> = LazyLock::new(|| {
    SOURCE_TIERS
        .iter()
        .map(|tier| (tier.weight, normalize_all(tier.sources)))
        .collect()
});

/// Credibility weight for a source name
pub fn source_weight(source_name: &str) -> f64 {
    let name = normalize(source_name.trim());
    if name.is_empty() {
        return MISSING_SOURCE_WEIGHT;
    }

    NORMALIZED_SOURCE_TIERS
        .iter()
        .find(|(_, sources)| contains_any(&name, sources))
        .map(|(weight, _)| *weight)
        .unwrap_or(UNKNOWN_SOURCE_WEIGHT)
}

/// Severity levels, highest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Elevated,
    Moderate,
}

/// A severity tier: a score multiplier plus the phrases that trigger it
#[derive(Debug, Clone)]
pub struct SeverityTier {
    pub level: Severity,
    pub multiplier: f64,
    pub keywords: &'static [&'static str],
}

/// Severity tiers in priority order
pub static SEVERITY_TIERS: &[SeverityTier] = &[
    SeverityTier {
        level: Severity::Critical,
        multiplier: 2.5,
        keywords: &[
            "nuclear strike", "nuclear attack", "nuclear threat", "nuclear escalation",
            "full-scale war", "declaration of war", "state of war",
            "mobilization order", "reserves called up", "troops deployed",
            "article 5", "nato article 5", "collective defense",
            "tactical nuclear", "nuclear warhead",
        ],
    },
    SeverityTier {
        level: Severity::High,
        multiplier: 2.0,
        keywords: &[
            "imminent strike", "imminent attack", "preparing to strike",
            "military buildup", "forces gathering", "will strike",
            "vowed to attack", "threatened to strike",
            "invasion", "incursion", "annexation",
            "cruise missile", "ballistic missile", "hypersonic",
            "drone swarm", "airspace violation", "sovereignty violation",
            "territorial violation", "border breach",
        ],
    },
    SeverityTier {
        level: Severity::Elevated,
        multiplier: 1.5,
        keywords: &[
            "strike", "attack", "airstrike", "bombing", "missile",
            "rocket", "retaliate", "retaliation", "response",
            "offensive", "counteroffensive", "shelling", "artillery",
            "drone strike", "drone attack", "sabotage",
            "cyber attack", "hybrid warfare", "disinformation campaign",
        ],
    },
    SeverityTier {
        level: Severity::Moderate,
        multiplier: 1.0,
        keywords: &[
            "threatens", "warned", "tensions", "escalation",
            "conflict", "crisis", "provocation", "sanctions",
            "troop movement", "military exercise", "naval exercise",
            "reconnaissance", "surveillance", "posturing",
        ],
    },
];

/// Phrases marking tension-reducing news
pub static DEESCALATION_KEYWORDS: &[&str] = &[
    "ceasefire", "cease-fire", "truce", "peace talks", "peace agreement",
    "diplomatic solution", "negotiations", "de-escalation", "de-escalate",
    "tensions ease", "tensions cool", "tensions subside", "calm",
    "defused", "avoided", "no plans to", "ruled out", "backs down",
    "restraint", "diplomatic efforts", "unlikely to strike",
    "peace summit", "peace plan", "peace deal", "Minsk agreement",
    "withdrawal", "pullback", "disengagement", "humanitarian corridor",
    "prisoner exchange", "grain deal", "diplomatic channel",
];

static NORMALIZED_SEVERITY_TIERS: LazyLock<Vec<(Severity, f64, Vec<String>)>> =
    LazyLock::new(|| {
        SEVERITY_TIERS
            .iter()
            .map(|tier| (tier.level, tier.multiplier, normalize_all(tier.keywords)))
            .collect()
    });

static NORMALIZED_DEESCALATION: LazyLock<Vec<String>> =
    LazyLock::new(|| normalize_all(DEESCALATION_KEYWORDS));

/// Highest severity tier present in already-normalized text
pub fn detect_severity(normalized_text: &str) -> Option<(Severity, f64)> {
    NORMALIZED_SEVERITY_TIERS
        .iter()
        .find(|(_, _, keywords)| contains_any(normalized_text, keywords))
        .map(|(level, multiplier, _)| (*level, *multiplier))
}

/// Severity multiplier for already-normalized text (1.0 when nothing matches)
pub fn severity_multiplier(normalized_text: &str) -> f64 {
    detect_severity(normalized_text)
        .map(|(_, multiplier)| multiplier)
        .unwrap_or(NEUTRAL_SEVERITY)
}

/// Whether already-normalized text reads as de-escalation
pub fn is_deescalation(normalized_text: &str) -> bool {
    contains_any(normalized_text, &NORMALIZED_DEESCALATION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_weight_tiers() {
        assert_eq!(source_weight("Reuters"), 1.0);
        assert_eq!(source_weight("BBC News"), 1.0);
        assert_eq!(source_weight("Kyiv Independent"), 0.85);
        assert_eq!(source_weight("ISW"), 0.9);
        assert_eq!(source_weight("Bloomberg"), 0.6);
        assert_eq!(source_weight("GDELT"), 0.4);
        assert_eq!(source_weight("r/ukraine"), 0.3);
    }

    #[test]
    fn test_source_weight_case_insensitive_substring() {
        assert_eq!(source_weight("reuters.com"), 1.0);
        assert_eq!(source_weight("KYIV INDEPENDENT (English)"), 0.85);
    }

    #[test]
    fn test_source_weight_fallbacks() {
        assert_eq!(source_weight(""), MISSING_SOURCE_WEIGHT);
        assert_eq!(source_weight("   "), MISSING_SOURCE_WEIGHT);
        assert_eq!(source_weight("Local Gazette"), UNKNOWN_SOURCE_WEIGHT);
    }

    #[test]
    fn test_source_tier_priority_is_positional() {
        // Matches both the premium entry and the social "r/" fragment
        assert_eq!(source_weight("Reuters r/worldnews mirror"), 1.0);
    }

    #[test]
    fn test_severity_priority() {
        let text = normalize("Crisis deepens as NATO discusses Article 5");
        assert_eq!(detect_severity(&text), Some((Severity::Critical, 2.5)));

        let text = normalize("Russian invasion continues");
        assert_eq!(severity_multiplier(&text), 2.0);

        let text = normalize("Artillery shelling overnight");
        assert_eq!(severity_multiplier(&text), 1.5);

        let text = normalize("Weather report for Nuuk");
        assert_eq!(severity_multiplier(&text), NEUTRAL_SEVERITY);
    }

    #[test]
    fn test_deescalation_detection() {
        assert!(is_deescalation(&normalize("Ceasefire holds along the front")));
        assert!(is_deescalation(&normalize("Talks revive the MINSK AGREEMENT")));
        assert!(!is_deescalation(&normalize("Missile strike on Kharkiv")));
    }
}
