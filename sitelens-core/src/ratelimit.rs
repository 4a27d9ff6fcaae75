//! Fixed-window rate limiting keyed by caller identity.

use std::time::Instant;

use dashmap::DashMap;
use tracing::debug;

use sitelens_model::RateLimitRule;

use crate::error::{AuditError, Result};

#[derive(Debug, Clone, Copy)]
struct WindowSlot {
    window_start: Instant,
    count: u32,
}

/// Fixed-window counter per key.
///
/// Windows are anchored to each key's first request, not to wall-clock
/// boundaries. State for idle keys is reclaimed lazily when the key
/// next appears.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    rule: RateLimitRule,
    windows: DashMap<String, WindowSlot>,
}

impl FixedWindowLimiter {
    pub fn new(rule: RateLimitRule) -> Self {
        Self {
            rule,
            windows: DashMap::new(),
        }
    }

    pub fn rule(&self) -> &RateLimitRule {
        &self.rule
    }

    /// Record one request for `key`, or refuse it with a retry hint.
    pub fn check(&self, key: &str) -> Result<()> {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> Result<()> {
        let mut slot = self.windows.entry(key.to_string()).or_insert(
            WindowSlot {
                window_start: now,
                count: 0,
            },
        );

        if now.duration_since(slot.window_start) >= self.rule.window {
            slot.window_start = now;
            slot.count = 0;
        }

        if slot.count >= self.rule.limit {
            let elapsed = now.duration_since(slot.window_start);
            let retry_after = self.rule.window.saturating_sub(elapsed);
            debug!(
                key,
                rule = %self.rule.name,
                retry_after_secs = retry_after.as_secs(),
                "rate limit exceeded"
            );
            return Err(AuditError::RateLimited {
                retry_after_secs: retry_after.as_secs().max(1),
            });
        }

        slot.count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn limiter(limit: u32, window: Duration) -> FixedWindowLimiter {
        FixedWindowLimiter::new(RateLimitRule {
            name: "test".to_string(),
            limit,
            window,
        })
    }

    #[test]
    fn allows_up_to_the_limit_then_refuses() {
        let limiter = limiter(3, Duration::from_secs(60));
        let start = Instant::now();
        for _ in 0..3 {
            limiter.check_at("1.2.3.4", start).unwrap();
        }
        let refused = limiter.check_at("1.2.3.4", start).unwrap_err();
        match refused {
            AuditError::RateLimited { retry_after_secs } => {
                assert!(retry_after_secs >= 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn keys_are_independent() {
        let limiter = limiter(1, Duration::from_secs(60));
        let start = Instant::now();
        limiter.check_at("a", start).unwrap();
        limiter.check_at("b", start).unwrap();
        assert!(limiter.check_at("a", start).is_err());
    }

    #[test]
    fn window_rollover_resets_the_count() {
        let limiter = limiter(1, Duration::from_secs(60));
        let start = Instant::now();
        limiter.check_at("a", start).unwrap();
        assert!(limiter.check_at("a", start).is_err());
        let later = start + Duration::from_secs(61);
        limiter.check_at("a", later).unwrap();
    }
}
