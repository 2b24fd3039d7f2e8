//! `durreq date <value>...` – midnight-UTC timestamps of dates.

use anyhow::{Context, Result};
use durreq_core::dates::DateCache;

/// Timestamps for `values` in order; repeated values are parsed once.
fn timestamps(values: &[String], cache: &mut DateCache) -> Result<Vec<i64>> {
    values
        .iter()
        .map(|v| cache.timestamp(v).with_context(|| format!("date {:?}", v)))
        .collect()
}

pub fn run_date(values: &[String]) -> Result<()> {
    let mut cache = DateCache::default();
    for ts in timestamps(values, &mut cache)? {
        println!("{}", ts);
    }
    tracing::debug!(distinct = cache.len(), "dates parsed");
    Ok(())
}
