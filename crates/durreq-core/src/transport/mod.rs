//! Transport capability consumed by the durable request executor.
//!
//! The executor only needs "make one request, get a response or a transport
//! error". [`CurlTransport`] is the libcurl-backed implementation; closures
//! with the right signature work as transports too, which is what the tests use.

mod curl_transport;
mod request;
mod response;

pub use curl_transport::CurlTransport;
pub use request::{DurableRequest, Method};
pub use response::Response;

use std::sync::atomic::AtomicBool;

/// Failure reported by a transport before any HTTP status was received.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Network-level failure (connection refused, DNS, reset, empty reply).
    #[error("connection failed: {0}")]
    Connect(String),
    /// Connect or transfer timeout.
    #[error("timed out: {0}")]
    Timeout(String),
    /// Anything else. Not retried.
    #[error("transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Connectivity and timeout failures are retryable; everything else is not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TransportError::Connect(_) | TransportError::Timeout(_))
    }
}

/// Performs a single HTTP exchange for a request.
pub trait Transport {
    fn send(&self, request: &DurableRequest) -> Result<Response, TransportError>;

    /// Like [`Transport::send`], but gives up on the exchange once `abort` is set.
    /// Transports that cannot interrupt a call in flight keep this default.
    fn send_abortable(
        &self,
        request: &DurableRequest,
        abort: Option<&AtomicBool>,
    ) -> Result<Response, TransportError> {
        let _ = abort;
        self.send(request)
    }
}

impl<F> Transport for F
where
    F: Fn(&DurableRequest) -> Result<Response, TransportError>,
{
    fn send(&self, request: &DurableRequest) -> Result<Response, TransportError> {
        self(request)
    }
}
