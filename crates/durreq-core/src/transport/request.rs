use serde_json::Value;
use url::Url;

/// HTTP method shape of a durable request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Immutable description of one durable request: method, target and optional
/// JSON body. The same value is handed to the transport on every attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct DurableRequest {
    method: Method,
    target: Url,
    body: Option<Value>,
}

impl DurableRequest {
    pub fn new(method: Method, target: Url) -> Self {
        Self {
            method,
            target,
            body: None,
        }
    }

    /// GET request without a body.
    pub fn get(target: &str) -> Result<Self, url::ParseError> {
        Ok(Self::new(Method::Get, Url::parse(target)?))
    }

    /// POST request carrying `body` as JSON.
    pub fn post_json(target: &str, body: Value) -> Result<Self, url::ParseError> {
        Ok(Self::new(Method::Post, Url::parse(target)?).with_json(body))
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn target(&self) -> &Url {
        &self.target
    }

    /// JSON payload, if any. `None` means the request is sent without a body.
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}
