// src/fetch/policy.rs
// =============================================================================
// Bounded retry with exponential backoff.
//
// The default is a single attempt. With `--retries N` a transient failure
// (timeout, refused connection, broken body) is retried up to N more times,
// waiting base, 2*base, 4*base... capped at max_delay. Then we give up.
// =============================================================================

use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first one (never below 1)
    pub max_attempts: u32,
    /// Delay before the first retry
    pub base_delay: Duration,
    /// Upper bound on any single delay
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    pub fn with_retries(retries: u32) -> Self {
        Self {
            max_attempts: retries.saturating_add(1),
            ..Self::default()
        }
    }

    // Delay to wait after `attempt` (1-based) failed, or None when we are out
    // of attempts
    pub fn backoff(&self, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_attempts {
            return None;
        }

        let factor = 1u32 << attempt.saturating_sub(1).min(8);
        Some(self.base_delay.saturating_mul(factor).min(self.max_delay))
    }
}
