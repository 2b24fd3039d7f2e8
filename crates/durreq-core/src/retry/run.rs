//! Retry loop: attempt, classify, back off, until a terminal outcome.

use super::classify::Outcome;
use super::error::RequestError;
use super::policy::{RetryDecision, RetryPolicy};
use crate::transport::{Response, TransportError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Granularity at which an abortable sleep checks its token.
const ABORT_POLL: Duration = Duration::from_millis(50);

/// Waits between attempts. Swappable so tests can record delays instead of sleeping.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Blocking sleep on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

fn is_aborted(abort: Option<&AtomicBool>) -> bool {
    abort.is_some_and(|a| a.load(Ordering::Relaxed))
}

/// Sleep for `duration`, in slices when an abort token is present.
fn wait<S: Sleeper + ?Sized>(
    sleeper: &S,
    duration: Duration,
    abort: Option<&AtomicBool>,
) -> Result<(), RequestError> {
    let Some(token) = abort else {
        sleeper.sleep(duration);
        return Ok(());
    };
    let mut left = duration;
    while !left.is_zero() {
        if token.load(Ordering::Relaxed) {
            return Err(RequestError::Aborted);
        }
        let slice = left.min(ABORT_POLL);
        sleeper.sleep(slice);
        left -= slice;
    }
    Ok(())
}

/// Runs `attempt` until it yields a terminal outcome or the policy's budget is spent.
///
/// `attempt` performs one exchange and classifies it; a `TransportError` it
/// returns is outside the retryable categories and ends the call immediately.
/// The policy is validated before the first attempt, so an invalid policy
/// performs no I/O.
pub fn run_with_retry<S, F>(
    policy: &RetryPolicy,
    sleeper: &S,
    abort: Option<&AtomicBool>,
    mut attempt: F,
) -> Result<Response, RequestError>
where
    S: Sleeper + ?Sized,
    F: FnMut() -> Result<Outcome, TransportError>,
{
    policy.validate()?;
    let mut backoff = policy.backoff();
    let mut attempt_no = 1u32;
    loop {
        if is_aborted(abort) {
            return Err(RequestError::Aborted);
        }
        let outcome = match attempt() {
            Ok(outcome) => outcome,
            Err(_) if is_aborted(abort) => return Err(RequestError::Aborted),
            Err(e) => {
                tracing::error!(attempt = attempt_no, error = %e, "unexpected transport error");
                return Err(e.into());
            }
        };

        match outcome {
            Outcome::Success(resp) => {
                tracing::info!(attempt = attempt_no, status = resp.status, "request was successful");
                return Ok(resp);
            }
            Outcome::ClientError { status, body } => {
                tracing::error!(
                    attempt = attempt_no,
                    "could not complete request due to status code {}: {}",
                    status,
                    body
                );
                return Err(RequestError::Client { status, body });
            }
            Outcome::ServerError(status) => {
                tracing::warn!(attempt = attempt_no, status, "server error");
            }
            Outcome::TransportFailure(ref e) => {
                tracing::warn!(attempt = attempt_no, error = %e, "network error");
            }
        }

        if is_aborted(abort) {
            tracing::info!(attempt = attempt_no, last = %outcome, "request aborted");
            return Err(RequestError::Aborted);
        }

        match backoff.decide() {
            RetryDecision::NoRetry => {
                tracing::warn!(
                    attempts = policy.attempts,
                    last = %outcome,
                    "unable to complete request, retries exhausted"
                );
                return Err(RequestError::RetriesExhausted {
                    attempts: policy.attempts,
                });
            }
            RetryDecision::RetryAfter(d) => {
                tracing::info!(attempt = attempt_no, delay = ?d, "will retry request");
                wait(sleeper, d, abort)?;
                attempt_no += 1;
            }
        }
    }
}
