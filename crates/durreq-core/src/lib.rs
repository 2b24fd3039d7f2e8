pub mod config;
pub mod dates;
pub mod durable;
pub mod logging;
pub mod retry;
pub mod transport;

pub use durable::DurableClient;
pub use retry::{RequestError, RetryPolicy, SuccessCodes};
pub use transport::{CurlTransport, DurableRequest, Response, Transport, TransportError};
