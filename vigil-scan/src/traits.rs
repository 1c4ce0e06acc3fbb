//! The scanner seam between the runtime and the live sources

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use vigil_core::{FlightReport, NotamReport, MAX_WINDOW_DAYS};
use vigil_sources::SourceError;

use crate::ThreatReport;

/// Errors from scan operations
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Unknown target: {0}")]
    UnknownTarget(String),

    #[error("Invalid window: {0} days (must be 1-{max})", max = MAX_WINDOW_DAYS)]
    InvalidWindow(u32),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Reject windows outside `1..=MAX_WINDOW_DAYS`
pub fn validate_window(days: u32) -> Result<u32, ScanError> {
    if (1..=MAX_WINDOW_DAYS).contains(&days) {
        Ok(days)
    } else {
        Err(ScanError::InvalidWindow(days))
    }
}

/// Produces the three cacheable reports
#[async_trait]
pub trait Scanner: Send + Sync {
    /// Aggregate and score one target over a window of days
    async fn scan_threat(&self, target: &str, days: u32) -> Result<ThreatReport, ScanError>;

    /// Airspace alerts for every NOTAM region
    async fn scan_notams(&self) -> Result<NotamReport, ScanError>;

    /// European flight disruptions from recent news
    async fn scan_flights(&self) -> Result<FlightReport, ScanError>;
}

/// Thread-safe scanner handle
pub type SharedScanner = Arc<dyn Scanner>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_window() {
        assert_eq!(validate_window(1).unwrap(), 1);
        assert_eq!(validate_window(90).unwrap(), 90);
        assert!(matches!(validate_window(0), Err(ScanError::InvalidWindow(0))));
        assert!(matches!(validate_window(91), Err(ScanError::InvalidWindow(91))));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ScanError::InvalidWindow(120).to_string(),
            "Invalid window: 120 days (must be 1-90)"
        );
        assert_eq!(
            ScanError::UnknownTarget("atlantis".into()).to_string(),
            "Unknown target: atlantis"
        );
    }
}
