//! CLI for durable HTTP requests.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use durreq_core::config::{self, DurreqConfig};
use durreq_core::logging;
use durreq_core::RetryPolicy;

use commands::{run_date, run_get, run_post};

/// Top-level CLI for durreq.
#[derive(Debug, Parser)]
#[command(name = "durreq")]
#[command(about = "durreq: HTTP requests with bounded retries and exponential backoff", long_about = None)]
pub struct Cli {
    /// Maximum number of attempts, including the first (overrides config).
    #[arg(long, global = true, value_name = "N")]
    pub attempts: Option<u32>,

    /// Delay in seconds before the first retry; doubles after each retry (overrides config).
    #[arg(long, global = true, value_name = "SECS", allow_negative_numbers = true)]
    pub delay: Option<f64>,

    /// Log filter when RUST_LOG is unset, e.g. "debug" (overrides config).
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// GET a URL, retrying on connection failures and 5xx; prints the body.
    Get {
        /// HTTP/HTTPS URL to fetch.
        url: String,
    },

    /// POST a JSON body; 201 and 409 (already exists) count as success.
    Post {
        /// HTTP/HTTPS URL to store to.
        url: String,
        /// JSON document to send.
        #[arg(long, value_name = "JSON")]
        json: String,
    },

    /// Print the Unix timestamp of midnight UTC for each date string.
    Date {
        /// Dates or datetimes, e.g. 2020-06-20 or 2020-06-20T14:39:10-0600.
        #[arg(required = true)]
        values: Vec<String>,
    },
}

impl Cli {
    /// Config retry section with command-line overrides applied, validated.
    pub fn retry_policy(&self, cfg: &DurreqConfig) -> Result<RetryPolicy> {
        let attempts = self.attempts.unwrap_or(cfg.retry.attempts);
        let delay = self.delay.unwrap_or(cfg.retry.delay_secs);
        Ok(RetryPolicy::from_secs_f64(attempts, delay)?)
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        if let Some(level) = &cli.log_level {
            cfg.logging.level = level.clone();
        }
        if let Err(e) = logging::init_logging(&cfg.logging) {
            logging::init_logging_stderr(&cfg.logging.level);
            tracing::warn!("file logging unavailable, using stderr: {:#}", e);
        }
        tracing::debug!("loaded config: {:?}", cfg);

        match &cli.command {
            CliCommand::Get { url } => {
                run_get(url, cli.retry_policy(&cfg)?, &cfg.transport).await?
            }
            CliCommand::Post { url, json } => {
                run_post(url, json, cli.retry_policy(&cfg)?, &cfg.transport).await?
            }
            CliCommand::Date { values } => run_date(values)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
