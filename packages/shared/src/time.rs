//! Time-related utilities with clock abstraction for testability.
//!
//! Timestamps travel through the hub as Unix milliseconds (UTC). Rendering to a
//! human-readable string happens only at the edges, with an explicit offset.

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        current_timestamp_millis()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp (milliseconds)
pub fn current_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Build a fixed offset from whole hours east of UTC.
///
/// Out-of-range values (beyond ±23 hours) fall back to UTC.
pub fn offset_from_hours(hours: i32) -> FixedOffset {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix())
}

fn to_datetime(timestamp_millis: i64, offset: FixedOffset) -> DateTime<FixedOffset> {
    match offset.timestamp_millis_opt(timestamp_millis).single() {
        Some(dt) => dt,
        None => DateTime::<Utc>::UNIX_EPOCH.with_timezone(&offset),
    }
}

/// Render a timestamp as a short time-of-day string (e.g. `3:04:05 PM`)
pub fn format_time_of_day(timestamp_millis: i64, offset: FixedOffset) -> String {
    to_datetime(timestamp_millis, offset)
        .format("%-I:%M:%S %p")
        .to_string()
}

/// Convert Unix timestamp (milliseconds) to RFC 3339 format in the given offset
pub fn timestamp_to_rfc3339(timestamp_millis: i64, offset: FixedOffset) -> String {
    to_datetime(timestamp_millis, offset).to_rfc3339()
}
