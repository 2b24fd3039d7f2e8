//! Terminal errors of a durable request.

use crate::transport::TransportError;

/// Fatal outcome of a durable request. Retryable failures never reach the
/// caller individually; they surface only as [`RequestError::RetriesExhausted`].
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// Invalid retry budget or delay. No attempt was made.
    #[error("invalid retry configuration: {0}")]
    Configuration(String),
    /// Target could not be parsed as a URL. No attempt was made.
    #[error("invalid target url: {0}")]
    InvalidTarget(#[from] url::ParseError),
    /// Non-success, non-5xx status. Never retried.
    #[error("could not complete request due to status code {status}: {body}")]
    Client { status: u32, body: String },
    /// Every attempt ended in a connectivity failure or a 5xx.
    #[error("unable to complete request after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
    /// Transport failure outside the connectivity/timeout category.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Abort token was set before the request could finish.
    #[error("request aborted")]
    Aborted,
}

impl RequestError {
    /// Status code of a client error, if this is one.
    pub fn status(&self) -> Option<u32> {
        match self {
            RequestError::Client { status, .. } => Some(*status),
            _ => None,
        }
    }
}
