//! Casualty figures pulled out of article text
//!
//! Works sentence by sentence: the first keyword of each category found in a
//! sentence marks the source as reporting casualties, and the first number
//! pattern that ends at that keyword supplies a count. Only the largest count
//! per category is kept.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{normalize, Article};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CasualtyKind {
    Deaths,
    Injuries,
    Arrests,
}

/// Keywords per category, English then Russian and Ukrainian
static CASUALTY_KEYWORDS: &[(CasualtyKind, &[&str])] = &[
    (
        CasualtyKind::Deaths,
        &[
            "killed", "dead", "died", "death toll", "fatalities", "deaths",
            "shot dead", "killed by", "killed in",
            "people have died", "people have been killed",
            "убит", "погиб", "смерть",
            "загинув", "загиблі",
        ],
    ),
    (
        CasualtyKind::Injuries,
        &[
            "injured", "wounded", "hurt", "injuries", "casualties",
            "hospitalized", "critical condition", "serious injuries",
            "ранен", "поранен",
        ],
    ),
    (
        CasualtyKind::Arrests,
        &[
            "arrested", "detained", "detention", "arrest", "arrests",
            "taken into custody", "custody", "apprehended",
            "imprisoned", "prisoner of war", "prisoners of war", "pows",
            "задержан", "арестован",
        ],
    ),
];

/// Number prefixes tried in order; each is completed with a keyword
const NUMBER_PATTERNS: &[&str] = &[
    r"(\d+(?:,\d{3})*)\s+(?:people\s+)?.{0,20}?",
    r"(?:more than|over|at least)\s+(\d+(?:,\d{3})*)\s+(?:people\s+)?.{0,30}?",
    r"(\d+(?:,\d{3})*)\s+people\s+(?:have been|had been|have)\s+.{0,20}?",
    r"(hundreds?|thousands?|dozens?|several\s+(?:hundred|thousand|dozen)|many)\s+(?:people\s+)?.{0,20}?",
];

struct KeywordMatcher {
    keyword: String,
    patterns: Vec<Regex>,
}

static MATCHERS: LazyLock<Vec<(CasualtyKind, Vec<KeywordMatcher>)>> = LazyLock::new(|| {
    CASUALTY_KEYWORDS
        .iter()
        .map(|(kind, keywords)| {
            let matchers = keywords
                .iter()
                .map(|keyword| {
                    let keyword = normalize(keyword);
                    let patterns = NUMBER_PATTERNS
                        .iter()
                        .filter_map(|prefix| {
                            Regex::new(&format!("(?i){}{}", prefix, regex::escape(&keyword))).ok()
                        })
                        .collect();
                    KeywordMatcher { keyword, patterns }
                })
                .collect();
            (*kind, matchers)
        })
        .collect()
});

static SENTENCE_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid sentence regex"));

static THOUSANDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*thousand").expect("valid thousands regex"));

/// Convert a numeric or vague quantity ("1,200", "hundreds", "dozens") to a count
pub fn parse_number_word(raw: &str) -> u64 {
    let word = raw.trim().to_lowercase();

    if let Ok(n) = word.parse() {
        return n;
    }
    if word.contains(',') {
        if let Ok(n) = word.replace(',', "").parse() {
            return n;
        }
    }

    if word.contains("hundred") {
        if ["several", "few", "many"].iter().any(|w| word.contains(w)) {
            200
        } else {
            100
        }
    } else if word.contains("thousand") {
        THOUSANDS
            .captures(&word)
            .and_then(|c| c[1].parse::<u64>().ok())
            .map(|n| n.saturating_mul(1000))
            .unwrap_or(1000)
    } else if word.contains("dozen") {
        12
    } else {
        0
    }
}

/// A count that raised a category maximum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CasualtyDetail {
    #[serde(rename = "type")]
    pub kind: CasualtyKind,
    pub count: u64,
    pub source: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CasualtyReport {
    pub deaths: u64,
    pub injuries: u64,
    pub arrests: u64,
    /// Sources mentioning any casualty keyword, sorted
    pub sources: Vec<String>,
    pub details: Vec<CasualtyDetail>,
}

impl CasualtyReport {
    fn count_mut(&mut self, kind: CasualtyKind) -> &mut u64 {
        match kind {
            CasualtyKind::Deaths => &mut self.deaths,
            CasualtyKind::Injuries => &mut self.injuries,
            CasualtyKind::Arrests => &mut self.arrests,
        }
    }
}

/// Scan articles for casualty figures
pub fn extract_casualties(articles: &[Article]) -> CasualtyReport {
    let mut report = CasualtyReport::default();
    let mut sources = BTreeSet::new();

    for article in articles {
        let text = article.normalized_text();
        let source = if article.source_name.is_empty() {
            "Unknown"
        } else {
            article.source_name.as_str()
        };

        for sentence in SENTENCE_SPLIT.split(&text) {
            for (kind, matchers) in MATCHERS.iter() {
                let Some(matcher) = matchers.iter().find(|m| sentence.contains(&m.keyword)) else {
                    continue;
                };
                sources.insert(source.to_string());

                let Some(count) = matcher
                    .patterns
                    .iter()
                    .find_map(|re| re.captures(sentence))
                    .map(|c| parse_number_word(&c[1]))
                else {
                    continue;
                };

                let current = report.count_mut(*kind);
                if count > *current {
                    *current = count;
                    report.details.push(CasualtyDetail {
                        kind: *kind,
                        count,
                        source: source.to_string(),
                        url: article.url.clone(),
                    });
                }
            }
        }
    }

    report.sources = sources.into_iter().collect();
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_word() {
        assert_eq!(parse_number_word("12"), 12);
        assert_eq!(parse_number_word("1,200"), 1200);
        assert_eq!(parse_number_word("hundreds"), 100);
        assert_eq!(parse_number_word("several hundred"), 200);
        assert_eq!(parse_number_word("5 thousand"), 5000);
        assert_eq!(parse_number_word("thousands"), 1000);
        assert_eq!(parse_number_word("dozens"), 12);
        assert_eq!(parse_number_word("99999999999999999999 thousand"), 1000);
        assert_eq!(parse_number_word("18446744073709552 thousand"), u64::MAX);
        assert_eq!(parse_number_word("many"), 0);
    }

    #[test]
    fn test_extracts_counts_per_category() {
        let articles = vec![Article::builder("At least 12 people were killed in the strike")
            .description("Dozens wounded. Later 3 suspects were arrested.")
            .source("Reuters")
            .url("https://example.com/1")
            .build()];

        let report = extract_casualties(&articles);
        assert_eq!(report.deaths, 12);
        assert_eq!(report.injuries, 12);
        assert_eq!(report.arrests, 3);
        assert_eq!(report.sources, vec!["Reuters"]);
        assert_eq!(report.details.len(), 3);
    }

    #[test]
    fn test_keeps_maximum() {
        let articles = vec![
            Article::builder("5 people killed overnight").source("A").build(),
            Article::builder("Death toll rises: more than 1,200 people have been killed")
                .source("B")
                .build(),
            Article::builder("3 people killed in Kharkiv").source("C").build(),
        ];

        let report = extract_casualties(&articles);
        assert_eq!(report.deaths, 1200);
        assert_eq!(report.details.len(), 2);
        assert_eq!(report.details[1].source, "B");
        assert_eq!(report.sources, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_cyrillic_keywords() {
        let articles = vec![Article::builder("В результате удара 7 человек погибли")
            .source("Meduza")
            .language("ru")
            .build()];

        let report = extract_casualties(&articles);
        assert_eq!(report.deaths, 7);
    }

    #[test]
    fn test_mention_without_number_records_source() {
        let articles = vec![Article::builder("Several soldiers injured near the border")
            .source("Kyiv Independent")
            .build()];

        let report = extract_casualties(&articles);
        assert_eq!(report.injuries, 0);
        assert_eq!(report.sources, vec!["Kyiv Independent"]);
        assert!(report.details.is_empty());
    }

    #[test]
    fn test_no_casualty_text() {
        let report = extract_casualties(&[Article::builder("Trade talks resume").build()]);
        assert_eq!(report, CasualtyReport::default());
    }
}
