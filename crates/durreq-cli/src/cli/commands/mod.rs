//! CLI command handlers. Each command is in its own file.

mod date;
mod get;
mod post;

pub use date::run_date;
pub use get::run_get;
pub use post::run_post;

use anyhow::{Context, Result};
use durreq_core::{RequestError, Response};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Abort token that is set when the process receives Ctrl-C.
fn abort_on_ctrl_c() -> Arc<AtomicBool> {
    let abort = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&abort);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, aborting request");
            flag.store(true, Ordering::Relaxed);
        }
    });
    abort
}

/// Run a blocking durable request off the async runtime.
async fn run_blocking<F>(f: F) -> Result<Response>
where
    F: FnOnce() -> Result<Response, RequestError> + Send + 'static,
{
    let resp = tokio::task::spawn_blocking(f)
        .await
        .context("request task join")??;
    Ok(resp)
}

/// Write the response body to stdout as-is.
fn print_body(resp: &Response) -> Result<()> {
    let mut out = std::io::stdout().lock();
    out.write_all(&resp.body)?;
    if !resp.body.ends_with(b"\n") && !resp.body.is_empty() {
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
