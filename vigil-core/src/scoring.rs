//! Threat-probability scoring engine
//!
//! `score` is a pure function of its inputs: every time-dependent quantity is
//! computed against the `now` the caller passes in, so the same articles and
//! the same `now` always produce the same assessment.
//!
//! Per article:
//! - time decay: `2^(-age_days / HALF_LIFE_DAYS)`, or `UNPARSABLE_DECAY`
//! - source weight from the credibility tiers
//! - severity multiplier from the keyword tiers
//! - de-escalating articles contribute `-3 × decay × weight` instead
//!
//! The summed contribution is scaled by a momentum multiplier derived from
//! recent (≤48h) versus older article density, then mapped onto the final
//! probability around a base score of 25.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    is_deescalation, severity_multiplier, source_weight, Article, TargetConfig, BASE_SCORE,
    HALF_LIFE_DAYS, MAX_TOP_CONTRIBUTORS, RECENT_WINDOW_HOURS, UNPARSABLE_DECAY,
};

/// Fixed multiplier for de-escalating articles, independent of severity
const DEESCALATION_FACTOR: f64 = -3.0;

/// Scale applied to a positive weighted score
const POSITIVE_SCALE: f64 = 0.8;

const MIN_PROBABILITY: i32 = 10;
const MAX_PROBABILITY: i32 = 95;

/// Ceiling for the empty-input prior
const NO_DATA_CEILING: i32 = 99;

/// Trend of coverage density
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Momentum {
    Increasing,
    Stable,
    Decreasing,
}

impl Momentum {
    /// Multiplier applied to the summed contribution
    pub fn multiplier(&self) -> f64 {
        match self {
            Momentum::Increasing => 1.2,
            Momentum::Stable => 1.0,
            Momentum::Decreasing => 0.8,
        }
    }
}

/// How much evidence stands behind an assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Coarse horizon label derived from the probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeline {
    #[serde(rename = "180+ days")]
    Beyond180Days,
    #[serde(rename = "91-180 days")]
    Within180Days,
    #[serde(rename = "31-90 days")]
    Within90Days,
    #[serde(rename = "0-30 days")]
    Within30Days,
}

impl Timeline {
    pub fn label(&self) -> &'static str {
        match self {
            Timeline::Beyond180Days => "180+ days",
            Timeline::Within180Days => "91-180 days",
            Timeline::Within90Days => "31-90 days",
            Timeline::Within30Days => "0-30 days",
        }
    }
}

/// Diagnostic record explaining how a probability was reached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub base_score: i32,
    pub baseline_adjustment: i32,
    pub article_count: usize,
    pub recent_articles_48h: usize,
    pub older_articles: usize,
    pub deescalation_count: usize,
    pub unique_sources: usize,
    pub weighted_score: f64,
    pub momentum_multiplier: f64,
}

/// Per-article weighting detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    pub source: String,
    pub title: String,
    pub url: String,
    pub published_at: String,
    pub source_weight: f64,
    pub time_decay: f64,
    /// Severity multiplier applied (1.0 when no tier matched)
    pub severity: f64,
    pub deescalation: bool,
    pub contribution: f64,
    /// Share of the absolute weighted score, in percent
    pub contribution_percent: f64,
}

/// Result of scoring one target's articles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatAssessment {
    pub probability: i32,
    pub momentum: Momentum,
    pub confidence: Confidence,
    pub timeline: Timeline,
    pub breakdown: ScoreBreakdown,
    pub top_contributors: Vec<Contributor>,
}

/// Exponential decay for an article published at `published` as seen at `now`.
///
/// Future-dated articles have negative age and weigh more than 1.0.
pub fn time_decay(published: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    match published {
        Some(published) => {
            let age_days = age_hours(published, now) / 24.0;
            2f64.powf(-age_days / HALF_LIFE_DAYS)
        }
        None => UNPARSABLE_DECAY,
    }
}

fn age_hours(published: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - published).num_milliseconds() as f64 / 3_600_000.0
}

/// Momentum from recent/older article counts over a window of `window_days`
pub fn momentum(recent: usize, older: usize, window_days: u32) -> Momentum {
    if recent == 0 || older == 0 {
        return Momentum::Stable;
    }

    let recent_density = recent as f64 / 2.0;
    let older_density = if window_days > 2 {
        older as f64 / (window_days - 2) as f64
    } else {
        older as f64
    };

    let ratio = if older_density > 0.0 {
        recent_density / older_density
    } else {
        2.0
    };

    if ratio > 1.5 {
        Momentum::Increasing
    } else if ratio < 0.7 {
        Momentum::Decreasing
    } else {
        Momentum::Stable
    }
}

/// Confidence from the article count and number of distinct sources
pub fn confidence(article_count: usize, unique_sources: usize) -> Confidence {
    if article_count >= 20 && unique_sources >= 8 {
        Confidence::High
    } else if article_count >= 10 && unique_sources >= 5 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// Timeline bucket for a probability, pulled in when momentum is rising
pub fn timeline(probability: i32, momentum: Momentum) -> Timeline {
    if momentum == Momentum::Increasing && probability > 50 {
        return Timeline::Within30Days;
    }

    match probability {
        p if p < 30 => Timeline::Beyond180Days,
        p if p < 50 => Timeline::Within180Days,
        p if p < 70 => Timeline::Within90Days,
        _ => Timeline::Within30Days,
    }
}

/// Weight a single article
pub fn weigh_article(article: &Article, now: DateTime<Utc>) -> Contributor {
    let text = article.normalized_text();
    let decay = time_decay(article.published(), now);
    let weight = source_weight(&article.source_name);
    let severity = severity_multiplier(&text);
    let deescalation = is_deescalation(&text);

    let contribution = if deescalation {
        DEESCALATION_FACTOR * decay * weight
    } else {
        decay * weight * severity
    };

    Contributor {
        source: article.source_name.clone(),
        title: article.title.clone(),
        url: article.url.clone(),
        published_at: article.published_at.clone(),
        source_weight: weight,
        time_decay: decay,
        severity,
        deescalation,
        contribution,
        contribution_percent: 0.0,
    }
}

/// Whether the article falls inside the recent (≤48h) window.
///
/// Unparsable timestamps count as older.
fn is_recent(article: &Article, now: DateTime<Utc>) -> bool {
    article
        .published()
        .map(|published| age_hours(published, now) <= RECENT_WINDOW_HOURS)
        .unwrap_or(false)
}

/// Score a target's articles
pub fn score(
    articles: &[Article],
    target: &TargetConfig,
    window_days: u32,
    now: DateTime<Utc>,
) -> ThreatAssessment {
    let adjustment = target.baseline_adjustment;

    if articles.is_empty() {
        // Uninformed prior: deliberately not clamped to the 95 ceiling
        let probability = (BASE_SCORE + adjustment).min(NO_DATA_CEILING);
        return ThreatAssessment {
            probability,
            momentum: Momentum::Stable,
            confidence: Confidence::Low,
            timeline: timeline(probability, Momentum::Stable),
            breakdown: ScoreBreakdown {
                base_score: BASE_SCORE,
                baseline_adjustment: adjustment,
                article_count: 0,
                recent_articles_48h: 0,
                older_articles: 0,
                deescalation_count: 0,
                unique_sources: 0,
                weighted_score: 0.0,
                momentum_multiplier: Momentum::Stable.multiplier(),
            },
            top_contributors: Vec::new(),
        };
    }

    let mut contributors = Vec::with_capacity(articles.len());
    let mut summed = 0.0;
    let mut recent = 0;
    let mut deescalation_count = 0;

    for article in articles {
        let contributor = weigh_article(article, now);
        summed += contributor.contribution;
        if contributor.deescalation {
            deescalation_count += 1;
        }
        if is_recent(article, now) {
            recent += 1;
        }
        contributors.push(contributor);
    }

    let older = articles.len() - recent;
    let momentum = momentum(recent, older, window_days);
    let weighted_score = summed * momentum.multiplier();

    let raw = if weighted_score < 0.0 {
        (f64::from(BASE_SCORE + adjustment) + weighted_score).max(f64::from(MIN_PROBABILITY))
    } else {
        f64::from(BASE_SCORE + adjustment) + weighted_score * POSITIVE_SCALE
    };
    // `as` truncates toward zero
    let probability = (raw as i32).clamp(MIN_PROBABILITY, MAX_PROBABILITY);

    let unique_sources = articles
        .iter()
        .map(|a| a.source_name.as_str())
        .collect::<HashSet<_>>()
        .len();

    let denominator = weighted_score.abs().max(1.0);
    for contributor in &mut contributors {
        contributor.contribution_percent = contributor.contribution.abs() / denominator * 100.0;
    }
    contributors.sort_by(|a, b| b.contribution.abs().total_cmp(&a.contribution.abs()));
    contributors.truncate(MAX_TOP_CONTRIBUTORS);

    ThreatAssessment {
        probability,
        momentum,
        confidence: confidence(articles.len(), unique_sources),
        timeline: timeline(probability, momentum),
        breakdown: ScoreBreakdown {
            base_score: BASE_SCORE,
            baseline_adjustment: adjustment,
            article_count: articles.len(),
            recent_articles_48h: recent,
            older_articles: older,
            deescalation_count,
            unique_sources,
            weighted_score,
            momentum_multiplier: momentum.multiplier(),
        },
        top_contributors: contributors,
    }
}
