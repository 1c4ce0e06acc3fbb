//! Offline scanner for service, scheduler and API tests

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use vigil_core::{find_target, FlightReport, NotamReport};
use vigil_scan::{build_report, validate_window, ScanError, Scanner, SharedScanner, ThreatReport};
use vigil_sources::SourceError;

/// Scores an empty article set for every target; counts every call
#[derive(Default)]
pub struct FakeScanner {
    pub threat_calls: AtomicUsize,
    pub notam_calls: AtomicUsize,
    pub flight_calls: AtomicUsize,
    pub fail: AtomicBool,
}

impl FakeScanner {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        let scanner = Self::default();
        scanner.fail.store(true, Ordering::SeqCst);
        Arc::new(scanner)
    }

    pub fn shared(self: &Arc<Self>) -> SharedScanner {
        self.clone()
    }

    pub fn total_calls(&self) -> usize {
        self.threat_calls.load(Ordering::SeqCst)
            + self.notam_calls.load(Ordering::SeqCst)
            + self.flight_calls.load(Ordering::SeqCst)
    }

    fn outcome(&self) -> Result<(), ScanError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ScanError::Source(SourceError::Status {
                adapter: "fake".to_string(),
                status: 503,
            }));
        }
        Ok(())
    }
}

#[async_trait]
impl Scanner for FakeScanner {
    async fn scan_threat(&self, target: &str, days: u32) -> Result<ThreatReport, ScanError> {
        self.threat_calls.fetch_add(1, Ordering::SeqCst);
        let config = find_target(target).ok_or_else(|| ScanError::UnknownTarget(target.to_string()))?;
        let days = validate_window(days)?;
        self.outcome()?;
        Ok(build_report(config, days, &[], Utc::now()))
    }

    async fn scan_notams(&self) -> Result<NotamReport, ScanError> {
        self.notam_calls.fetch_add(1, Ordering::SeqCst);
        self.outcome()?;
        Ok(NotamReport::new(Vec::new(), vec!["ukraine".to_string()], Utc::now()))
    }

    async fn scan_flights(&self) -> Result<FlightReport, ScanError> {
        self.flight_calls.fetch_add(1, Ordering::SeqCst);
        self.outcome()?;
        Ok(FlightReport {
            disruptions: Vec::new(),
            articles_scanned: 0,
            scanned_at: Utc::now(),
        })
    }
}
