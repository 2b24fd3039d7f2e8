//! Logging init: stdout plus an optional log file (XDG state dir by default),
//! or graceful fallback to stderr.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Writer that is either a file or stderr (used when file clone fails).
enum FileOrStderr {
    File(fs::File),
    Stderr,
}

impl io::Write for FileOrStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FileOrStderr::File(f) => f.write(buf),
            FileOrStderr::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FileOrStderr::File(f) => f.flush(),
            FileOrStderr::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct FileMakeWriter(fs::File);

impl<'a> MakeWriter<'a> for FileMakeWriter {
    type Writer = FileOrStderr;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(FileOrStderr::File)
            .unwrap_or(FileOrStderr::Stderr)
    }
}

/// `RUST_LOG` wins; otherwise the configured level.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Default log file: `~/.local/state/durreq/durreq.log`.
pub fn default_log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("durreq")?;
    Ok(xdg_dirs.get_state_home().join("durreq").join("durreq.log"))
}

fn open_log_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {}", path.display()))
}

/// Initialize structured logging to stdout and, if enabled, to the log file.
/// On failure (e.g. log dir unwritable), returns Err so the caller can fall back to stderr.
pub fn init_logging(cfg: &LoggingConfig) -> Result<()> {
    let stdout_layer = tracing_subscriber::fmt::layer().with_writer(io::stdout);

    if !cfg.file {
        tracing_subscriber::registry()
            .with(env_filter(&cfg.level))
            .with(stdout_layer)
            .try_init()
            .context("install tracing subscriber")?;
        return Ok(());
    }

    let log_file_path = match &cfg.path {
        Some(p) => p.clone(),
        None => default_log_path()?,
    };
    let file = open_log_file(&log_file_path)?;
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(FileMakeWriter(file))
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter(&cfg.level))
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .context("install tracing subscriber")?;

    tracing::info!("durreq logging initialized at {}", log_file_path.display());
    Ok(())
}

/// Initialize logging to stderr only (no file). Use when init_logging() fails so the CLI doesn't crash.
pub fn init_logging_stderr(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
