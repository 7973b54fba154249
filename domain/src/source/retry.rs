//! Retry policies for provider queries

use super::provider::ProviderId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bounded retry policy: a fixed attempt budget with a constant delay between attempts
///
/// # Example
///
/// ```
/// use lookup_domain::{ProviderId, RetryPolicy};
/// use std::time::Duration;
///
/// let policy = RetryPolicy::for_provider(ProviderId::Secondary1);
/// assert_eq!(policy.max_attempts, 3);
/// assert_eq!(policy.retry_delay, Duration::from_millis(1500));
/// assert!(policy.should_retry(2));
/// assert!(!policy.should_retry(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Never zero.
    pub max_attempts: u32,
    /// Pause between consecutive attempts
    pub retry_delay: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

    pub fn new(max_attempts: u32, retry_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            retry_delay,
        }
    }

    /// Single attempt, no retry
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// The policy each provider runs with unless configured otherwise.
    pub fn for_provider(provider: ProviderId) -> Self {
        match provider {
            ProviderId::Authoritative => Self::no_retry(),
            ProviderId::Secondary1 => Self::new(3, Self::DEFAULT_DELAY),
            ProviderId::Secondary2 => Self::new(2, Self::DEFAULT_DELAY),
        }
    }

    /// Whether another attempt is allowed after `attempt` (1-indexed) failed.
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::no_retry()
    }
}

impl std::fmt::Display for RetryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.max_attempts == 1 {
            write!(f, "1 attempt")
        } else {
            write!(
                f,
                "{} attempts, {}ms apart",
                self.max_attempts,
                self.retry_delay.as_millis()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_defaults() {
        assert_eq!(
            RetryPolicy::for_provider(ProviderId::Authoritative),
            RetryPolicy::no_retry()
        );
        let secondary2 = RetryPolicy::for_provider(ProviderId::Secondary2);
        assert_eq!(secondary2.max_attempts, 2);
        assert_eq!(secondary2.retry_delay, Duration::from_millis(1500));
    }

    #[test]
    fn test_zero_attempts_clamped() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts, 1);
    }

    #[test]
    fn test_should_retry() {
        let policy = RetryPolicy::new(2, Duration::ZERO);
        assert!(policy.should_retry(1));
        assert!(!policy.should_retry(2));
        assert!(!RetryPolicy::no_retry().should_retry(1));
    }

    #[test]
    fn test_display() {
        assert_eq!(RetryPolicy::no_retry().to_string(), "1 attempt");
        assert_eq!(
            RetryPolicy::for_provider(ProviderId::Secondary1).to_string(),
            "3 attempts, 1500ms apart"
        );
    }
}
