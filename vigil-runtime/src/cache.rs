//! In-memory report cache
//!
//! A single map behind one short-held lock. No scanning or I/O happens while
//! the lock is held. Entries are only removed by an explicit flush; stale
//! entries stay in the map but read as misses.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use serde::Serialize;

use vigil_core::{FlightReport, NotamReport};
use vigil_scan::ThreatReport;

/// Identity of a cached report
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CacheKey {
    Threat { target: String, days: u32 },
    Notams,
    Flights,
}

impl CacheKey {
    pub fn threat(target: &str, days: u32) -> Self {
        CacheKey::Threat {
            target: target.to_lowercase(),
            days,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Threat { target, days } => write!(f, "threat:{}:{}", target, days),
            CacheKey::Notams => write!(f, "notams"),
            CacheKey::Flights => write!(f, "flights"),
        }
    }
}

impl FromStr for CacheKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split(':').collect::<Vec<_>>().as_slice() {
            ["notams"] => Ok(CacheKey::Notams),
            ["flights"] => Ok(CacheKey::Flights),
            ["threat", target, days] if !target.is_empty() => days
                .parse()
                .map(|days| CacheKey::threat(target, days))
                .map_err(|_| format!("invalid window in cache key: {}", s)),
            _ => Err(format!("invalid cache key: {}", s)),
        }
    }
}

/// A cached report
#[derive(Debug, Clone)]
pub enum CachedPayload {
    Threat(Arc<ThreatReport>),
    Notams(Arc<NotamReport>),
    Flights(Arc<FlightReport>),
}

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: CachedPayload,
    written_at: DateTime<Utc>,
}

/// A fresh cache read
#[derive(Debug, Clone)]
pub struct CacheHit {
    pub payload: CachedPayload,
    pub age_seconds: i64,
}

/// One row of the diagnostic view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntryStatus {
    pub key: String,
    pub written_at: DateTime<Utc>,
    pub age_seconds: i64,
    pub fresh: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatus {
    pub ttl_seconds: i64,
    pub entries: Vec<CacheEntryStatus>,
}

pub struct CacheStore {
    ttl: TimeDelta,
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl CacheStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl: TimeDelta::from_std(ttl).unwrap_or_else(|_| TimeDelta::days(36_500)),
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }

    fn is_fresh(&self, age: TimeDelta) -> bool {
        age < self.ttl
    }

    pub fn get(&self, key: &CacheKey) -> Option<CacheHit> {
        self.get_at(key, Utc::now())
    }

    /// Fresh entry for `key` as of `now`
    pub fn get_at(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<CacheHit> {
        let entries = self.entries.lock();
        let entry = entries.get(key)?;
        let age = (now - entry.written_at).max(TimeDelta::zero());

        self.is_fresh(age).then(|| CacheHit {
            payload: entry.payload.clone(),
            age_seconds: age.num_seconds(),
        })
    }

    pub fn set(&self, key: CacheKey, payload: CachedPayload) {
        self.set_at(key, payload, Utc::now());
    }

    /// Insert or overwrite; the last writer wins
    pub fn set_at(&self, key: CacheKey, payload: CachedPayload, now: DateTime<Utc>) {
        self.entries.lock().insert(
            key,
            CacheEntry {
                payload,
                written_at: now,
            },
        );
    }

    /// Remove one entry; true if it existed
    pub fn clear(&self, key: &CacheKey) -> bool {
        self.entries.lock().remove(key).is_some()
    }

    /// Remove everything, returning how many entries were dropped
    pub fn clear_all(&self) -> usize {
        let mut entries = self.entries.lock();
        let count = entries.len();
        entries.clear();
        count
    }

    pub fn status(&self) -> CacheStatus {
        self.status_at(Utc::now())
    }

    /// Every entry with its age, stale ones included
    pub fn status_at(&self, now: DateTime<Utc>) -> CacheStatus {
        let mut rows: Vec<(CacheKey, DateTime<Utc>)> = self
            .entries
            .lock()
            .iter()
            .map(|(key, entry)| (key.clone(), entry.written_at))
            .collect();
        rows.sort();

        CacheStatus {
            ttl_seconds: self.ttl_seconds(),
            entries: rows
                .into_iter()
                .map(|(key, written_at)| {
                    let age = (now - written_at).max(TimeDelta::zero());
                    CacheEntryStatus {
                        key: key.to_string(),
                        written_at,
                        age_seconds: age.num_seconds(),
                        fresh: self.is_fresh(age),
                    }
                })
                .collect(),
        }
    }
}
