//! Rate limiting port.

use std::time::Duration;

/// Rate limiter trait - abstraction over rate limiting backends.
///
/// Checks are keyed by client (normally the remote IP) so one caller
/// cannot exhaust the budget for everyone. Implementations must be
/// cheap and non-blocking: the middleware calls this on every request.
pub trait RateLimiter: Send + Sync {
    /// Check if a request from `key` is allowed and update its counter.
    fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError>;
}

/// Result of a rate limit check.
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_after: Duration,
}

/// Rate limit errors.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Backend error: {0}")]
    Backend(String),
}
