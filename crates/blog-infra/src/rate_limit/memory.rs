//! In-memory rate limiter using governor crate.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::clock::{Clock, DefaultClock};
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter as GovernorRateLimiter};

use blog_core::ports::{RateLimitError, RateLimitResult, RateLimiter};

type KeyedRateLimiter = GovernorRateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

/// In-memory rate limiter configuration.
///
/// Defaults mirror the classic express-rate-limit setup: 100 requests
/// per 15 minute window, counted per client.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window, per key.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(15 * 60),
        }
    }
}

/// In-memory rate limiter using the GCRA algorithm.
///
/// Each key (client IP) gets its own budget. Limits are per-process,
/// not distributed across instances.
pub struct InMemoryRateLimiter {
    limiter: KeyedRateLimiter,
    config: RateLimitConfig,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        let quota = Quota::with_period(config.window / config.max_requests)
            .expect("Valid quota")
            .allow_burst(NonZeroU32::new(config.max_requests).expect("Non-zero"));

        Self {
            limiter: KeyedRateLimiter::keyed(quota),
            config,
        }
    }

    pub fn from_env() -> Self {
        let defaults = RateLimitConfig::default();
        let config = RateLimitConfig {
            max_requests: std::env::var("RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_requests),
            window: std::env::var("RATE_LIMIT_WINDOW_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.window),
        };
        Self::new(config)
    }
}

impl RateLimiter for InMemoryRateLimiter {
    fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError> {
        match self.limiter.check_key(&key.to_string()) {
            Ok(_) => Ok(RateLimitResult {
                allowed: true,
                remaining: self.config.max_requests, // Approximate
                reset_after: self.config.window,
            }),
            Err(not_until) => Ok(RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_after: not_until.wait_time_from(DefaultClock::default().now()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_within_quota_is_allowed_then_limited() {
        let limiter = InMemoryRateLimiter::new(RateLimitConfig {
            max_requests: 3,
            window: Duration::from_secs(60),
        });

        for _ in 0..3 {
            let result = limiter.check("client").unwrap();
            assert!(result.allowed);
        }

        let result = limiter.check("client").unwrap();
        assert!(!result.allowed);
        assert_eq!(result.remaining, 0);
    }

    #[test]
    fn each_client_has_its_own_budget() {
        let limiter = InMemoryRateLimiter::new(RateLimitConfig {
            max_requests: 1,
            window: Duration::from_secs(60),
        });

        assert!(limiter.check("10.0.0.1").unwrap().allowed);
        assert!(!limiter.check("10.0.0.1").unwrap().allowed);

        // A different client is unaffected by the first one's burst.
        assert!(limiter.check("10.0.0.2").unwrap().allowed);
    }
}
