//! `durreq post <url> --json <body>` – durable store.

use anyhow::{Context, Result};
use durreq_core::config::TransportConfig;
use durreq_core::{CurlTransport, DurableClient, RetryPolicy};
use serde_json::Value;

pub async fn run_post(
    url: &str,
    json: &str,
    policy: RetryPolicy,
    transport: &TransportConfig,
) -> Result<()> {
    let body: Value = serde_json::from_str(json).context("parse --json")?;
    let client = DurableClient::new(CurlTransport::from_config(transport))
        .with_abort(super::abort_on_ctrl_c());
    let url = url.to_string();
    let resp = super::run_blocking(move || client.store(&url, &policy, body)).await?;
    if resp.status == 409 {
        tracing::info!("resource already exists");
    }
    super::print_body(&resp)
}
