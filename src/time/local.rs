use chrono::{FixedOffset, Local, Offset, TimeZone};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OffsetError {
    #[error("UTC offset out of range: {0}s (must be within +/-86399s)")]
    OutOfRange(i32),
}

/// Maps epoch seconds to a local-time-adjusted epoch-second value.
pub trait LocalTimeConverter: Send + Sync {
    fn to_local(&self, secs: i64) -> i64;
}

/// Leaves timestamps untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Identity;

impl LocalTimeConverter for Identity {
    fn to_local(&self, secs: i64) -> i64 {
        secs
    }
}

/// Applies the host time zone's offset in effect at the given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SystemLocal;

impl LocalTimeConverter for SystemLocal {
    fn to_local(&self, secs: i64) -> i64 {
        match Local.timestamp_opt(secs, 0).single() {
            Some(dt) => secs.saturating_add(i64::from(dt.offset().fix().local_minus_utc())),
            None => {
                debug!(secs = secs, "No unique local time, leaving timestamp as UTC");
                secs
            }
        }
    }
}

/// Applies a constant offset east of UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedOffsetConverter {
    offset: FixedOffset,
}

impl FixedOffsetConverter {
    pub fn new(offset_secs: i32) -> Result<Self, OffsetError> {
        FixedOffset::east_opt(offset_secs)
            .map(|offset| Self { offset })
            .ok_or(OffsetError::OutOfRange(offset_secs))
    }

    pub fn offset_secs(&self) -> i32 {
        self.offset.local_minus_utc()
    }
}

impl LocalTimeConverter for FixedOffsetConverter {
    fn to_local(&self, secs: i64) -> i64 {
        secs.saturating_add(i64::from(self.offset.local_minus_utc()))
    }
}

impl<L: LocalTimeConverter + ?Sized> LocalTimeConverter for &L {
    fn to_local(&self, secs: i64) -> i64 {
        (**self).to_local(secs)
    }
}
