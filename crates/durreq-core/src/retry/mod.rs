//! Retry and backoff policy for durable requests.
//!
//! This module encapsulates outcome classification (success codes, 5xx,
//! client errors, connectivity failures) and the doubling backoff schedule so
//! that the request presets in [`crate::durable`] share one retry loop.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_response, Outcome, SuccessCodes};
pub use error::RequestError;
pub use policy::{Backoff, RetryDecision, RetryPolicy};
pub use run::{run_with_retry, Sleeper, ThreadSleeper};
