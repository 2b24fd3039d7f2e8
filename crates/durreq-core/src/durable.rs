//! Durable requests: one HTTP call wrapped with bounded retry and backoff.
//!
//! [`DurableClient::execute`] is the general entry point. [`DurableClient::store`]
//! and [`DurableClient::fetch`] are presets over it that only pick the method,
//! body and success codes.

use crate::retry::{self, RequestError, RetryPolicy, Sleeper, SuccessCodes, ThreadSleeper};
use crate::transport::{DurableRequest, Response, Transport};
use serde_json::Value;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Executes durable requests over a transport.
///
/// Holds no state between calls; every call starts with the full budget of
/// the policy it is given.
#[derive(Debug, Clone)]
pub struct DurableClient<T, S = ThreadSleeper> {
    transport: T,
    sleeper: S,
    abort: Option<Arc<AtomicBool>>,
}

impl<T: Transport> DurableClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            sleeper: ThreadSleeper,
            abort: None,
        }
    }
}

impl<T: Transport, S: Sleeper> DurableClient<T, S> {
    /// Replace the inter-attempt sleeper.
    pub fn with_sleeper<S2: Sleeper>(self, sleeper: S2) -> DurableClient<T, S2> {
        DurableClient {
            transport: self.transport,
            sleeper,
            abort: self.abort,
        }
    }

    /// Once `abort` is set: interrupt the exchange in flight, skip pending
    /// sleeps and return [`RequestError::Aborted`].
    pub fn with_abort(mut self, abort: Arc<AtomicBool>) -> Self {
        self.abort = Some(abort);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `request` until a success code, a client error, an unexpected
    /// transport error, or budget exhaustion.
    pub fn execute(
        &self,
        request: &DurableRequest,
        policy: &RetryPolicy,
        success_codes: &SuccessCodes,
    ) -> Result<Response, RequestError> {
        let span = tracing::info_span!(
            "durable_request",
            method = ?request.method(),
            target_url = %request.target()
        );
        let _guard = span.enter();
        let abort = self.abort.as_deref();
        retry::run_with_retry(policy, &self.sleeper, abort, || {
            retry::classify(self.transport.send_abortable(request, abort), success_codes)
        })
    }

    /// POST `body` as JSON; 201 and 409 (already exists) count as success.
    pub fn store(
        &self,
        target: &str,
        policy: &RetryPolicy,
        body: Value,
    ) -> Result<Response, RequestError> {
        policy.validate()?;
        let request = DurableRequest::post_json(target, body)?;
        self.execute(&request, policy, &SuccessCodes::store())
    }

    /// GET without a body using the default success codes.
    pub fn fetch(&self, target: &str, policy: &RetryPolicy) -> Result<Response, RequestError> {
        policy.validate()?;
        let request = DurableRequest::get(target)?;
        self.execute(&request, policy, &SuccessCodes::default())
    }
}
