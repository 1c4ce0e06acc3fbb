//! Request handling: cache first, scan on miss or force
//!
//! A forced or missed scan runs outside the cache lock and writes back under
//! it, so it can race the refresh scheduler on the same key. Whichever write
//! lands last is kept.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use vigil_core::{
    find_target, target_ids, Confidence, FlightReport, Momentum, NotamReport, Timeline,
    DEFAULT_WINDOW_DAYS, TARGETS,
};
use vigil_scan::{validate_window, ScanError, SharedScanner, ThreatReport};

use crate::{CacheHit, CacheKey, CacheStore, CachedPayload, RateLimitInfo, RateLimiter};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid target '{0}'. Must be one of: {valid}", valid = target_ids().join(", "))]
    UnknownTarget(String),

    #[error("Invalid window: {0} days")]
    InvalidWindow(u32),

    #[error("Rate limit reached. Try again later.")]
    RateLimited(RateLimitInfo),

    #[error("Scan failed: {0}")]
    Scan(#[from] ScanError),
}

/// A report plus where it came from
#[derive(Debug, Clone)]
pub struct Served<T> {
    pub value: T,
    pub cached: bool,
    pub cache_age_seconds: i64,
}

impl<T> Served<T> {
    fn fresh(value: T) -> Self {
        Self {
            value,
            cached: false,
            cache_age_seconds: 0,
        }
    }

    fn cached(value: T, cache_age_seconds: i64) -> Self {
        Self {
            value,
            cached: true,
            cache_age_seconds,
        }
    }
}

/// One target's row on the dashboard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardEntry {
    pub probability: i32,
    pub momentum: Momentum,
    pub timeline: Timeline,
    pub confidence: Confidence,
    pub total_articles: usize,
    pub flight_disruption_count: usize,
    pub cached: bool,
}

impl From<&Served<Arc<ThreatReport>>> for DashboardEntry {
    fn from(served: &Served<Arc<ThreatReport>>) -> Self {
        let report = &served.value;
        Self {
            probability: report.assessment.probability,
            momentum: report.assessment.momentum,
            timeline: report.assessment.timeline,
            confidence: report.assessment.confidence,
            total_articles: report.total_articles,
            flight_disruption_count: report.flight_disruptions.len(),
            cached: served.cached,
        }
    }
}

pub struct ThreatService {
    scanner: SharedScanner,
    cache: Arc<CacheStore>,
    limiter: Arc<RateLimiter>,
}

impl ThreatService {
    pub fn new(scanner: SharedScanner, cache: Arc<CacheStore>, limiter: Arc<RateLimiter>) -> Self {
        Self {
            scanner,
            cache,
            limiter,
        }
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    fn acquire(&self) -> Result<(), ServiceError> {
        self.limiter
            .try_acquire()
            .map(|_| ())
            .map_err(ServiceError::RateLimited)
    }

    /// Threat report for one target; `days` defaults to seven
    pub async fn threat(
        &self,
        target: &str,
        days: Option<u32>,
        force: bool,
    ) -> Result<Served<Arc<ThreatReport>>, ServiceError> {
        let config = find_target(target).ok_or_else(|| ServiceError::UnknownTarget(target.to_string()))?;
        let days = days.unwrap_or(DEFAULT_WINDOW_DAYS);
        validate_window(days).map_err(|_| ServiceError::InvalidWindow(days))?;

        let key = CacheKey::threat(config.id, days);
        if !force {
            if let Some(CacheHit {
                payload: CachedPayload::Threat(report),
                age_seconds,
            }) = self.cache.get(&key)
            {
                debug!("Cache hit for {} (age {}s)", key, age_seconds);
                return Ok(Served::cached(report, age_seconds));
            }
        }

        self.acquire()?;
        info!("Scanning {} ({} days, force={})", config.id, days, force);
        let report = Arc::new(self.scanner.scan_threat(config.id, days).await?);
        self.cache.set(key, CachedPayload::Threat(report.clone()));
        Ok(Served::fresh(report))
    }

    /// Summary row for every target, in target order
    pub async fn dashboard(
        &self,
        days: Option<u32>,
        force: bool,
    ) -> Result<BTreeMap<String, DashboardEntry>, ServiceError> {
        let mut rows = BTreeMap::new();
        for target in TARGETS {
            let served = self.threat(target.id, days, force).await?;
            rows.insert(target.id.to_string(), DashboardEntry::from(&served));
        }
        Ok(rows)
    }

    pub async fn notams(&self, force: bool) -> Result<Served<Arc<NotamReport>>, ServiceError> {
        if !force {
            if let Some(CacheHit {
                payload: CachedPayload::Notams(report),
                age_seconds,
            }) = self.cache.get(&CacheKey::Notams)
            {
                return Ok(Served::cached(report, age_seconds));
            }
        }

        self.acquire()?;
        let report = Arc::new(self.scanner.scan_notams().await?);
        self.cache.set(CacheKey::Notams, CachedPayload::Notams(report.clone()));
        Ok(Served::fresh(report))
    }

    pub async fn flights(&self, force: bool) -> Result<Served<Arc<FlightReport>>, ServiceError> {
        if !force {
            if let Some(CacheHit {
                payload: CachedPayload::Flights(report),
                age_seconds,
            }) = self.cache.get(&CacheKey::Flights)
            {
                return Ok(Served::cached(report, age_seconds));
            }
        }

        self.acquire()?;
        let report = Arc::new(self.scanner.scan_flights().await?);
        self.cache.set(CacheKey::Flights, CachedPayload::Flights(report.clone()));
        Ok(Served::fresh(report))
    }
}
