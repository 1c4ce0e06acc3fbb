//! Monitored target registry
//!
//! Each target carries its structural risk offset plus everything the source
//! adapters need to query for it.

use serde::Serialize;

/// An RSS feed bound to one or more targets
#[derive(Debug, Clone, Serialize)]
pub struct RssFeed {
    /// Outlet name, also used as the article source name
    pub name: &'static str,
    pub url: &'static str,
    /// Maximum items taken per fetch
    pub max_items: usize,
}

pub static KYIV_INDEPENDENT: RssFeed = RssFeed {
    name: "Kyiv Independent",
    url: "https://kyivindependent.com/feed/",
    max_items: 20,
};

pub static MEDUZA: RssFeed = RssFeed {
    name: "Meduza",
    url: "https://meduza.io/rss/en/all",
    max_items: 20,
};

pub static ISW: RssFeed = RssFeed {
    name: "ISW",
    url: "https://www.understandingwar.org/rss.xml",
    max_items: 15,
};

pub static ARCTIC_TODAY: RssFeed = RssFeed {
    name: "Arctic Today",
    url: "https://www.arctictoday.com/feed/",
    max_items: 15,
};

/// A monitored country or region
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetConfig {
    pub id: &'static str,
    /// Signed offset added to the base score
    pub baseline_adjustment: i32,
    pub description: &'static str,
    /// News query terms
    pub keywords: &'static [&'static str],
    pub reddit_keywords: &'static [&'static str],
    pub subreddits: &'static [&'static str],
    /// GDELT `sourcelang` codes to query
    pub gdelt_languages: &'static [&'static str],
    pub rss_feeds: &'static [&'static RssFeed],
    /// Whether reports for this target include casualty extraction
    pub tracks_casualties: bool,
}

impl TargetConfig {
    /// News query built from the first eight keywords
    pub fn news_query(&self) -> String {
        self.keywords.iter().take(8).copied().collect::<Vec<_>>().join(" OR ")
    }
}

/// All monitored targets, in display order
pub static TARGETS: &[TargetConfig] = &[
    TargetConfig {
        id: "greenland",
        baseline_adjustment: 3,
        description: "US acquisition rhetoric re: Greenland; Danish sovereignty tensions",
        keywords: &[
            "greenland", "grønland", "kalaallit nunaat",
            "denmark greenland", "greenland us", "greenland trump",
            "greenland acquisition", "greenland sovereignty",
            "greenland nato", "greenland arctic", "thule air base",
            "pituffik space base", "nuuk", "greenland independence",
            "greenland autonomy", "greenland rare earth",
            "múte egede", "greenland mineral",
        ],
        reddit_keywords: &[
            "Greenland", "Denmark", "Arctic", "Trump Greenland",
            "sovereignty", "NATO", "Thule", "Pituffik", "Nuuk",
            "rare earth", "acquisition",
        ],
        subreddits: &["Greenland", "europe", "geopolitics", "worldnews", "Denmark"],
        gdelt_languages: &["eng", "rus", "fra"],
        rss_feeds: &[&ARCTIC_TODAY],
        tracks_casualties: false,
    },
    TargetConfig {
        id: "ukraine",
        baseline_adjustment: 15,
        description: "Active war zone; Russia-Ukraine conflict ongoing since Feb 2022",
        keywords: &[
            "ukraine", "ukrainian", "kyiv", "kiev", "zelensky", "zelenskyy",
            "donbas", "donbass", "donetsk", "luhansk", "zaporizhzhia",
            "kherson", "crimea", "mariupol", "bakhmut", "avdiivka",
            "ukraine war", "ukraine offensive", "ukraine counteroffensive",
            "ukraine frontline", "ukraine ceasefire", "ukraine peace",
            "ukraine nato", "ukraine eu", "ukraine aid",
        ],
        reddit_keywords: &[
            "Ukraine", "Kyiv", "Zelensky", "frontline", "war",
            "Donbas", "offensive", "missile", "drone", "ceasefire",
            "NATO", "aid", "sanctions",
        ],
        subreddits: &[
            "ukraine", "UkraineWarVideoReport", "UkrainianConflict",
            "europe", "geopolitics", "worldnews",
        ],
        gdelt_languages: &["eng", "rus", "fra", "ukr"],
        rss_feeds: &[&KYIV_INDEPENDENT, &MEDUZA, &ISW],
        tracks_casualties: true,
    },
    TargetConfig {
        id: "russia",
        baseline_adjustment: 12,
        description: "Active aggressor in Ukraine; elevated NATO tensions; nuclear rhetoric",
        keywords: &[
            "russia", "russian", "moscow", "kremlin", "putin",
            "russian military", "russian forces", "russian army",
            "russia nato", "russia nuclear", "russia sanctions",
            "russia economy", "russia mobilization",
            "wagner", "prigozhin", "shoigu", "gerasimov",
            "russia ukraine", "russia europe", "russia baltic",
            "russia arctic", "kaliningrad", "russia drone",
            "russia poland", "russia airspace",
        ],
        reddit_keywords: &[
            "Russia", "Putin", "Kremlin", "Moscow", "sanctions",
            "nuclear", "NATO", "Wagner", "mobilization", "frontline",
            "Ukraine war", "Baltic", "Arctic",
        ],
        subreddits: &["russia", "europe", "geopolitics", "worldnews"],
        gdelt_languages: &["eng", "rus", "fra", "ukr"],
        rss_feeds: &[&KYIV_INDEPENDENT, &MEDUZA, &ISW],
        tracks_casualties: true,
    },
    TargetConfig {
        id: "poland",
        baseline_adjustment: 5,
        description: "NATO frontline state; Russian drone incursions; Belarus border tensions",
        keywords: &[
            "poland", "polish", "warsaw", "poland nato", "poland military",
            "poland border", "poland russia", "poland drone",
            "poland airspace", "poland ukraine", "poland belarus",
            "poland missile", "przewodów", "poland patriot",
            "poland defense", "poland troops", "tusk",
            "poland migration", "suwalki gap", "poland f-35",
            "poland air shield", "poland army modernization",
        ],
        reddit_keywords: &[
            "Poland", "Warsaw", "NATO", "border", "Russia",
            "drone", "airspace", "Belarus", "Suwalki", "missile",
            "defense", "Ukraine",
        ],
        subreddits: &["poland", "Polska", "europe", "geopolitics", "worldnews"],
        gdelt_languages: &["eng", "rus", "fra"],
        rss_feeds: &[],
        tracks_casualties: false,
    },
];

/// Look up a target by id (case-insensitive)
pub fn find_target(id: &str) -> Option<&'static TargetConfig> {
    TARGETS.iter().find(|t| t.id.eq_ignore_ascii_case(id.trim()))
}

/// Ids of all monitored targets
pub fn target_ids() -> Vec<&'static str> {
    TARGETS.iter().map(|t| t.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_target() {
        let ukraine = find_target("ukraine").unwrap();
        assert_eq!(ukraine.baseline_adjustment, 15);
        assert!(find_target("Poland").is_some());
        assert!(find_target("atlantis").is_none());
    }

    #[test]
    fn test_news_query_limits_terms() {
        let ukraine = find_target("ukraine").unwrap();
        let query = ukraine.news_query();
        assert_eq!(query.matches(" OR ").count(), 7);
        assert!(query.starts_with("ukraine OR ukrainian"));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids = target_ids();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), TARGETS.len());
    }

    #[test]
    fn test_feed_bindings() {
        assert_eq!(find_target("ukraine").unwrap().rss_feeds.len(), 3);
        assert_eq!(find_target("greenland").unwrap().rss_feeds[0].name, "Arctic Today");
        assert!(find_target("poland").unwrap().rss_feeds.is_empty());
    }
}
