//! Classify transport results and HTTP status codes into per-attempt outcomes.

use crate::transport::{Response, TransportError};
use std::collections::BTreeSet;
use std::fmt;

/// Status codes treated as definitive success for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessCodes(BTreeSet<u32>);

impl SuccessCodes {
    /// Success codes for generic requests.
    pub const DEFAULT: [u32; 4] = [200, 201, 202, 204];
    /// Success codes for store requests; 409 means the resource already exists.
    pub const STORE: [u32; 2] = [201, 409];

    /// An empty set falls back to [`SuccessCodes::DEFAULT`].
    pub fn new(codes: impl IntoIterator<Item = u32>) -> Self {
        let set: BTreeSet<u32> = codes.into_iter().collect();
        if set.is_empty() {
            return Self::default();
        }
        Self(set)
    }

    pub fn store() -> Self {
        Self::new(Self::STORE)
    }

    pub fn contains(&self, status: u32) -> bool {
        self.0.contains(&status)
    }
}

impl Default for SuccessCodes {
    fn default() -> Self {
        Self(Self::DEFAULT.into_iter().collect())
    }
}

/// Result of a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Connectivity or timeout failure (retryable).
    TransportFailure(TransportError),
    /// 5xx response (retryable).
    ServerError(u32),
    /// Status in the success set (terminal).
    Success(Response),
    /// Any other status (terminal, fatal).
    ClientError { status: u32, body: String },
}

impl Outcome {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Outcome::TransportFailure(_) | Outcome::ServerError(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::TransportFailure(e) => write!(f, "{}", e),
            Outcome::ServerError(code) => write!(f, "HTTP {}", code),
            Outcome::Success(resp) => write!(f, "HTTP {} (success)", resp.status),
            Outcome::ClientError { status, .. } => write!(f, "HTTP {}", status),
        }
    }
}

/// Classify a received response. 5xx is checked first, then the success set,
/// so a policy-designated code like 409 wins over client-error handling.
pub fn classify_response(resp: Response, success_codes: &SuccessCodes) -> Outcome {
    match resp.status {
        500..=599 => Outcome::ServerError(resp.status),
        s if success_codes.contains(s) => Outcome::Success(resp),
        status => Outcome::ClientError {
            status,
            body: resp.text().into_owned(),
        },
    }
}

/// Classify one transport result. Non-retryable transport errors are handed
/// back as `Err` so the caller can propagate them untouched.
pub fn classify(
    result: Result<Response, TransportError>,
    success_codes: &SuccessCodes,
) -> Result<Outcome, TransportError> {
    match result {
        Ok(resp) => Ok(classify_response(resp, success_codes)),
        Err(e) if e.is_retryable() => Ok(Outcome::TransportFailure(e)),
        Err(e) => Err(e),
    }
}

/// Map a curl error onto the transport error categories.
pub fn classify_curl_error(e: &curl::Error) -> TransportError {
    if e.is_operation_timedout() {
        return TransportError::Timeout(e.to_string());
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_ssl_connect_error()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return TransportError::Connect(e.to_string());
    }
    if e.is_aborted_by_callback() {
        return TransportError::Other("aborted".to_string());
    }
    TransportError::Other(e.to_string())
}
