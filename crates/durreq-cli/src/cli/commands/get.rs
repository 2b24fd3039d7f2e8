//! `durreq get <url>` – durable GET.

use anyhow::Result;
use durreq_core::config::TransportConfig;
use durreq_core::{CurlTransport, DurableClient, RetryPolicy};

pub async fn run_get(url: &str, policy: RetryPolicy, transport: &TransportConfig) -> Result<()> {
    let client = DurableClient::new(CurlTransport::from_config(transport))
        .with_abort(super::abort_on_ctrl_c());
    let url = url.to_string();
    let resp = super::run_blocking(move || client.fetch(&url, &policy)).await?;
    tracing::debug!(status = resp.status, "get finished");
    super::print_body(&resp)
}
