//! Background refresh scheduler
//!
//! Recomputes every target, then the NOTAM and flight reports, writing each
//! into the cache. Scans bypass the rate limiter. A shutdown signal on the
//! watch channel interrupts any pacing or interval sleep.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use vigil_core::TARGETS;
use vigil_scan::SharedScanner;

use crate::{CacheKey, CacheStore, CachedPayload, RefreshConfig};

/// Outcome of one refresh cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleSummary {
    pub refreshed: usize,
    pub failed: usize,
    pub interrupted: bool,
}

pub struct RefreshScheduler {
    scanner: SharedScanner,
    cache: Arc<CacheStore>,
    config: RefreshConfig,
}

/// Handle to a spawned scheduler
pub struct RefreshHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Signal the scheduler and wait for it to stop
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            error!("Refresh task ended abnormally: {}", e);
        }
    }
}

/// Sleep for `duration`; true if shutdown was signalled first
async fn sleep_or_shutdown(duration: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    if *shutdown.borrow() {
        return true;
    }
    if duration.is_zero() {
        return false;
    }
    tokio::select! {
        _ = tokio::time::sleep(duration) => false,
        // A dropped sender also stops the loop
        _ = shutdown.changed() => true,
    }
}

impl RefreshScheduler {
    pub fn new(scanner: SharedScanner, cache: Arc<CacheStore>, config: RefreshConfig) -> Self {
        Self {
            scanner,
            cache,
            config,
        }
    }

    /// Run one full cycle
    pub async fn run_cycle(&self, shutdown: &mut watch::Receiver<bool>) -> CycleSummary {
        let mut summary = CycleSummary::default();
        let days = self.config.window_days;

        for target in TARGETS {
            match self.scanner.scan_threat(target.id, days).await {
                Ok(report) => {
                    debug!("Refreshed {} ({}%)", target.id, report.assessment.probability);
                    self.cache.set(
                        CacheKey::threat(target.id, days),
                        CachedPayload::Threat(Arc::new(report)),
                    );
                    summary.refreshed += 1;
                }
                Err(e) => {
                    warn!("Refresh failed for {}: {}", target.id, e);
                    summary.failed += 1;
                }
            }
            if sleep_or_shutdown(self.config.pacing, shutdown).await {
                summary.interrupted = true;
                return summary;
            }
        }

        match self.scanner.scan_notams().await {
            Ok(report) => {
                debug!("Refreshed NOTAMs ({} alerts)", report.alerts.len());
                self.cache.set(CacheKey::Notams, CachedPayload::Notams(Arc::new(report)));
                summary.refreshed += 1;
            }
            Err(e) => {
                warn!("NOTAM refresh failed: {}", e);
                summary.failed += 1;
            }
        }
        if sleep_or_shutdown(self.config.pacing, shutdown).await {
            summary.interrupted = true;
            return summary;
        }

        match self.scanner.scan_flights().await {
            Ok(report) => {
                debug!("Refreshed flights ({} disruptions)", report.disruptions.len());
                self.cache.set(CacheKey::Flights, CachedPayload::Flights(Arc::new(report)));
                summary.refreshed += 1;
            }
            Err(e) => {
                warn!("Flight refresh failed: {}", e);
                summary.failed += 1;
            }
        }

        summary
    }

    /// Cycle until shutdown, sleeping `interval` between cycles
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "Refresh scheduler started ({} targets, every {}s)",
            TARGETS.len(),
            self.config.interval.as_secs()
        );

        loop {
            let summary = self.run_cycle(&mut shutdown).await;
            if summary.interrupted {
                break;
            }
            if summary.refreshed == 0 {
                error!("Refresh cycle failed: all {} scans errored", summary.failed);
            } else {
                info!(
                    "Refresh cycle complete: {} refreshed, {} failed",
                    summary.refreshed, summary.failed
                );
            }

            if sleep_or_shutdown(self.config.interval, &mut shutdown).await {
                break;
            }
        }

        info!("Refresh scheduler stopped");
    }

    pub fn spawn(self) -> RefreshHandle {
        let (tx, rx) = watch::channel(false);
        RefreshHandle {
            shutdown: tx,
            task: tokio::spawn(self.run(rx)),
        }
    }
}
