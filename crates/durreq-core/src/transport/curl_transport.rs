//! Blocking libcurl transport.
//!
//! One `Easy` handle per attempt; follows redirects, sends JSON bodies for
//! POST, and maps curl errors onto [`TransportError`] so the executor can tell
//! retryable connectivity failures from everything else.

use super::{DurableRequest, Method, Response, Transport, TransportError};
use crate::config::TransportConfig;
use crate::retry::classify_curl_error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

impl From<curl::Error> for TransportError {
    fn from(e: curl::Error) -> Self {
        classify_curl_error(&e)
    }
}

/// Transport backed by the curl crate's easy interface.
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    connect_timeout: Duration,
    timeout: Duration,
    abort: Option<Arc<AtomicBool>>,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
            abort: None,
        }
    }
}

impl CurlTransport {
    pub fn new(connect_timeout: Duration, timeout: Duration) -> Self {
        Self {
            connect_timeout,
            timeout,
            abort: None,
        }
    }

    pub fn from_config(cfg: &TransportConfig) -> Self {
        Self::new(
            Duration::from_secs(cfg.connect_timeout_secs),
            Duration::from_secs(cfg.timeout_secs),
        )
    }

    /// Abandon an in-flight transfer once `abort` is set, even when called
    /// through plain [`Transport::send`].
    pub fn with_abort(mut self, abort: Arc<AtomicBool>) -> Self {
        self.abort = Some(abort);
        self
    }
}

impl Transport for CurlTransport {
    fn send(&self, request: &DurableRequest) -> Result<Response, TransportError> {
        self.perform(request, self.abort.as_deref())
    }

    fn send_abortable(
        &self,
        request: &DurableRequest,
        abort: Option<&AtomicBool>,
    ) -> Result<Response, TransportError> {
        self.perform(request, abort.or(self.abort.as_deref()))
    }
}

impl CurlTransport {
    fn perform(
        &self,
        request: &DurableRequest,
        abort: Option<&AtomicBool>,
    ) -> Result<Response, TransportError> {
        let mut easy = curl::easy::Easy::new();
        easy.url(request.target().as_str())?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        match request.method() {
            Method::Get => easy.get(true)?,
            Method::Post => easy.post(true)?,
        }

        if let Some(json) = request.body() {
            let payload = serde_json::to_vec(json)
                .map_err(|e| TransportError::Other(format!("encode request body: {}", e)))?;
            easy.post_fields_copy(&payload)?;
            let mut list = curl::easy::List::new();
            list.append("Content-Type: application/json")?;
            easy.http_headers(list)?;
        } else if request.method() == Method::Post {
            easy.post_field_size(0)?;
        }

        if abort.is_some() {
            easy.progress(true)?;
        }

        let mut body = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            if let Some(abort) = abort {
                // Returning false from the progress callback makes curl abort the transfer.
                transfer.progress_function(move |_, _, _, _| !abort.load(Ordering::Relaxed))?;
            }
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        tracing::debug!(
            target_url = %request.target(),
            status,
            bytes = body.len(),
            "transport exchange complete"
        );
        Ok(Response { status, body })
    }
}
