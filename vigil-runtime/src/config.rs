//! Runtime configuration

use std::time::Duration;

use vigil_core::DEFAULT_WINDOW_DAYS;
use vigil_scan::SourceSettings;

/// Default cache TTL: four hours
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(4 * 60 * 60);

/// HTTP listener configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Background refresh configuration
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Run the scheduler at all
    pub enabled: bool,
    /// Sleep between consecutive scans within a cycle
    pub pacing: Duration,
    /// Sleep between cycles
    pub interval: Duration,
    /// Window used for the refreshed threat entries
    pub window_days: u32,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pacing: Duration::from_secs(5),
            interval: DEFAULT_CACHE_TTL,
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

/// Fixed-window scan budget
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub limit: u32,
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            limit: 100,
            window: Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// Everything `serve` needs
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub server: ServerConfig,
    pub sources: SourceSettings,
    pub cache_ttl: Duration,
    pub refresh: RefreshConfig,
    pub rate_limit: RateLimitConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            sources: SourceSettings::default(),
            cache_ttl: DEFAULT_CACHE_TTL,
            refresh: RefreshConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Set the cache TTL; the refresh interval follows it
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self.refresh.interval = ttl;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.server.addr(), "0.0.0.0:5000");
        assert_eq!(config.cache_ttl.as_secs(), 14_400);
        assert_eq!(config.refresh.interval, config.cache_ttl);
        assert_eq!(config.refresh.window_days, 7);
        assert_eq!(config.rate_limit.limit, 100);
    }

    #[test]
    fn test_ttl_drives_refresh_interval() {
        let config = RuntimeConfig::default().with_cache_ttl(Duration::from_secs(600));
        assert_eq!(config.refresh.interval.as_secs(), 600);
    }
}
