//! Date helpers: lenient parsing, a bounded parse cache, and conversions to
//! midnight-UTC timestamps.

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use std::collections::{HashMap, VecDeque};

/// Default number of entries kept by [`DateCache`].
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("unrecognized date: {0:?}")]
    Unrecognized(String),
    #[error("invalid utc offset: {0} seconds")]
    InvalidOffset(i32),
    #[error("timestamp out of range: {0}")]
    OutOfRange(i64),
}

fn as_utc(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    Utc.from_utc_datetime(&naive).with_timezone(&Utc.fix())
}

/// Parse a date or datetime string.
///
/// Accepts RFC 3339, ISO-8601 with a `+hhmm` offset, naive datetimes (taken
/// as UTC) and bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_date(input: &str) -> Result<DateTime<FixedOffset>, DateError> {
    let s = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(as_utc(naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(as_utc(date.and_time(NaiveTime::default())));
    }
    Err(DateError::Unrecognized(input.to_string()))
}

/// The instant `ts` (Unix seconds) expressed in the fixed offset `offset_secs`.
pub fn parse_utc_timestamp(ts: i64, offset_secs: i32) -> Result<DateTime<FixedOffset>, DateError> {
    let tz = FixedOffset::east_opt(offset_secs).ok_or(DateError::InvalidOffset(offset_secs))?;
    tz.timestamp_opt(ts, 0)
        .single()
        .ok_or(DateError::OutOfRange(ts))
}

/// Unix timestamp of midnight UTC on `dt`'s calendar date (in its own offset).
pub fn datetime_to_timestamp<Tz: TimeZone>(dt: &DateTime<Tz>) -> i64 {
    let midnight = dt.date_naive().and_time(NaiveTime::default());
    Utc.from_utc_datetime(&midnight).timestamp()
}

pub fn date_string_to_timestamp(input: &str) -> Result<i64, DateError> {
    parse_date(input).map(|dt| datetime_to_timestamp(&dt))
}

/// Memoizes [`parse_date`] with a bounded FIFO.
///
/// Owned by the caller; there is no process-wide cache.
#[derive(Debug, Clone)]
pub struct DateCache {
    capacity: usize,
    entries: HashMap<String, DateTime<FixedOffset>>,
    order: VecDeque<String>,
}

impl Default for DateCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl DateCache {
    /// A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    pub fn parse(&mut self, input: &str) -> Result<DateTime<FixedOffset>, DateError> {
        if let Some(dt) = self.entries.get(input) {
            return Ok(*dt);
        }
        let dt = parse_date(input)?;
        if self.order.len() == self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(input.to_string());
        self.entries.insert(input.to_string(), dt);
        Ok(dt)
    }

    pub fn timestamp(&mut self, input: &str) -> Result<i64, DateError> {
        self.parse(input).map(|dt| datetime_to_timestamp(&dt))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, input: &str) -> bool {
        self.entries.contains_key(input)
    }
}
