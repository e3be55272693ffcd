use chrono::{DateTime, Utc};
use std::fmt;
use tracing::trace;

use super::timeval::Timeval;
use crate::time::{Clock, LocalTimeConverter, SystemClock, SystemLocal};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const YEAR: i64 = 365 * DAY;

/// A past instant to describe relative to "now".
///
/// "Now" is either pinned with [`Point::with_recent_point`] or read from the
/// clock on every render, so two unpinned renders may differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point<C = SystemClock, L = SystemLocal> {
    past_point: Timeval,
    recent_point: Option<Timeval>,
    convert_to_local: bool,
    clock: C,
    local: L,
}

impl Point {
    pub fn from_tv(past: Timeval) -> Self {
        Self::new(past)
    }

    pub fn new(past: Timeval) -> Self {
        Self {
            past_point: past,
            recent_point: None,
            convert_to_local: false,
            clock: SystemClock,
            local: SystemLocal,
        }
    }
}

impl From<DateTime<Utc>> for Point {
    fn from(dt: DateTime<Utc>) -> Self {
        Point::new(Timeval::from(dt))
    }
}

impl<C: Clock, L: LocalTimeConverter> Point<C, L> {
    pub fn with_recent_point(mut self, recent: Timeval) -> Self {
        self.recent_point = Some(recent);
        self
    }

    pub fn with_convert_to_local(mut self, convert: bool) -> Self {
        self.convert_to_local = convert;
        self
    }

    pub fn with_clock<C2: Clock>(self, clock: C2) -> Point<C2, L> {
        Point {
            past_point: self.past_point,
            recent_point: self.recent_point,
            convert_to_local: self.convert_to_local,
            clock,
            local: self.local,
        }
    }

    pub fn with_local_converter<L2: LocalTimeConverter>(self, local: L2) -> Point<C, L2> {
        Point {
            past_point: self.past_point,
            recent_point: self.recent_point,
            convert_to_local: self.convert_to_local,
            clock: self.clock,
            local,
        }
    }

    pub fn past_point(&self) -> Timeval {
        self.past_point
    }

    pub fn recent_point(&self) -> Option<Timeval> {
        self.recent_point
    }

    pub fn convert_to_local(&self) -> bool {
        self.convert_to_local
    }

    /// The instant to compare against, after local conversion if enabled.
    fn resolve_now(&self) -> Timeval {
        let now = self.recent_point.unwrap_or_else(|| self.clock.now());
        if self.convert_to_local {
            return now.with_sec(self.local.to_local(now.sec()));
        }
        now
    }

    /// Bucketed phrase such as "3 hours ago" or "over 2 years ago".
    pub fn coarse_phrase(&self) -> String {
        let delta = self.resolve_now().sec().saturating_sub(self.past_point.sec());
        trace!(delta = delta, "Rendering coarse phrase");

        match delta {
            d if d < 0 => "in the future".to_string(),
            d if d < MINUTE => "just now".to_string(),
            d if d < 2 * MINUTE => "one minute ago".to_string(),
            d if d < HOUR => format!("{} minutes ago", d / MINUTE),
            d if d < 2 * HOUR => "one hour ago".to_string(),
            d if d < DAY => format!("{} hours ago", d / HOUR),
            d if d < 2 * DAY => "one day ago".to_string(),
            d if d < YEAR => format!("{} days ago", d / DAY),
            d if d < 2 * YEAR => "over a year ago".to_string(),
            d => format!("over {} years ago", d / YEAR),
        }
    }

    /// Second-resolution phrase for anything under ten minutes old, e.g.
    /// `" 2 minutes and  5 seconds ago"`. Older and future instants fall back
    /// to [`Point::coarse_phrase`].
    pub fn precise_phrase(&self) -> String {
        let diff = self.resolve_now() - self.past_point;
        trace!(sec = diff.sec(), usec = diff.usec(), "Rendering precise phrase");

        let secs = diff.sec();
        if secs < 0 {
            return self.coarse_phrase();
        }
        if secs <= 1 {
            return "a second ago".to_string();
        }
        if secs >= 10 * MINUTE {
            return self.coarse_phrase();
        }
        if secs < MINUTE {
            return format!("{:>2} seconds ago", secs);
        }

        let seconds = secs % MINUTE;
        let minutes = secs / MINUTE;
        format!(
            "{:>2} minute{} and {:>2} second{} ago",
            minutes,
            if minutes > 1 { "s" } else { "" },
            seconds,
            if seconds == 1 { "" } else { "s" }
        )
    }
}

impl<C: Clock, L: LocalTimeConverter> fmt::Display for Point<C, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str(&self.precise_phrase())
        } else {
            f.write_str(&self.coarse_phrase())
        }
    }
}
