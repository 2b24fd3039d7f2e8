use super::error::RequestError;
use std::time::Duration;

/// Decision returned by the backoff schedule after a retryable outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Budget exhausted; do not retry.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Retry budget for one durable request.
///
/// `attempts` counts the first try. The delay doubles after every retryable
/// outcome with no cap and no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first). Must be > 0.
    pub attempts: u32,
    /// Delay before the second attempt.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self { attempts, delay }
    }

    /// Build a policy from a fractional delay in seconds (e.g. from config or CLI).
    /// Negative, NaN and infinite delays are configuration errors.
    pub fn from_secs_f64(attempts: u32, delay_secs: f64) -> Result<Self, RequestError> {
        if !delay_secs.is_finite() || delay_secs < 0.0 {
            return Err(RequestError::Configuration(format!(
                "delay must be greater than or equal to 0, got {}",
                delay_secs
            )));
        }
        let delay = Duration::try_from_secs_f64(delay_secs)
            .map_err(|e| RequestError::Configuration(format!("delay out of range: {}", e)))?;
        let policy = Self::new(attempts, delay);
        policy.validate()?;
        Ok(policy)
    }

    /// Check the policy before the first attempt.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.attempts == 0 {
            return Err(RequestError::Configuration(
                "attempts must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Fresh backoff schedule for one call.
    pub fn backoff(&self) -> Backoff {
        Backoff {
            remaining: self.attempts,
            delay: self.delay,
        }
    }
}

/// Mutable `(remaining, delay)` pair driving a single call's retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    remaining: u32,
    delay: Duration,
}

impl Backoff {
    /// Attempts left, counting the one that just finished.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Consume one attempt after a retryable outcome.
    pub fn decide(&mut self) -> RetryDecision {
        if self.remaining <= 1 {
            self.remaining = 0;
            return RetryDecision::NoRetry;
        }
        let wait = self.delay;
        self.remaining -= 1;
        self.delay = self.delay.saturating_mul(2);
        RetryDecision::RetryAfter(wait)
    }
}
