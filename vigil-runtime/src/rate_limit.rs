//! Fixed-window scan budget
//!
//! Only requests that actually have to scan spend a token; cache hits are
//! free.

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use serde::Serialize;

use crate::RateLimitConfig;

/// Budget snapshot returned by `/rate-limit` and attached to 429 responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitInfo {
    pub requests_used: u32,
    pub requests_remaining: u32,
    pub requests_limit: u32,
    pub resets_in_seconds: i64,
}

struct Window {
    used: u32,
    resets_at: DateTime<Utc>,
}

pub struct RateLimiter {
    limit: u32,
    window: TimeDelta,
    state: Mutex<Window>,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self::new_at(config, Utc::now())
    }

    pub fn new_at(config: &RateLimitConfig, now: DateTime<Utc>) -> Self {
        let window = TimeDelta::from_std(config.window).unwrap_or_else(|_| TimeDelta::days(1));
        Self {
            limit: config.limit,
            window,
            state: Mutex::new(Window {
                used: 0,
                resets_at: now + window,
            }),
        }
    }

    fn roll(&self, state: &mut Window, now: DateTime<Utc>) {
        if now >= state.resets_at {
            state.used = 0;
            state.resets_at = now + self.window;
        }
    }

    fn snapshot(&self, state: &Window, now: DateTime<Utc>) -> RateLimitInfo {
        RateLimitInfo {
            requests_used: state.used,
            requests_remaining: self.limit.saturating_sub(state.used),
            requests_limit: self.limit,
            resets_in_seconds: (state.resets_at - now).num_seconds().max(0),
        }
    }

    pub fn try_acquire(&self) -> Result<RateLimitInfo, RateLimitInfo> {
        self.try_acquire_at(Utc::now())
    }

    /// Spend one token; `Err` carries the exhausted budget
    pub fn try_acquire_at(&self, now: DateTime<Utc>) -> Result<RateLimitInfo, RateLimitInfo> {
        let mut state = self.state.lock();
        self.roll(&mut state, now);

        if state.used >= self.limit {
            return Err(self.snapshot(&state, now));
        }
        state.used += 1;
        Ok(self.snapshot(&state, now))
    }

    pub fn info(&self) -> RateLimitInfo {
        self.info_at(Utc::now())
    }

    pub fn info_at(&self, now: DateTime<Utc>) -> RateLimitInfo {
        let mut state = self.state.lock();
        self.roll(&mut state, now);
        self.snapshot(&state, now)
    }
}
