use chrono::{DateTime, Utc};
use std::ops::Sub;
use thiserror::Error;

pub const MICROS_PER_SEC: i64 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimevalError {
    #[error("microseconds out of range: {0} (expected 0..1000000)")]
    MicrosOutOfRange(i64),
    #[error("timestamp out of range: {sec}s {usec}us")]
    OutOfRange { sec: i64, usec: i64 },
}

/// An absolute timestamp: seconds and microseconds since the Unix epoch.
///
/// `usec` is always normalized into `[0, 1_000_000)`, so a negative
/// difference of half a second is `{ sec: -1, usec: 500_000 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timeval {
    sec: i64,
    usec: i64,
}

impl Timeval {
    pub fn new(sec: i64, usec: i64) -> Result<Self, TimevalError> {
        if !(0..MICROS_PER_SEC).contains(&usec) {
            return Err(TimevalError::MicrosOutOfRange(usec));
        }
        Ok(Self { sec, usec })
    }

    pub fn from_secs(sec: i64) -> Self {
        Self { sec, usec: 0 }
    }

    pub fn sec(&self) -> i64 {
        self.sec
    }

    pub fn usec(&self) -> i64 {
        self.usec
    }

    /// Same sub-second part, different whole seconds.
    pub fn with_sec(self, sec: i64) -> Self {
        Self { sec, ..self }
    }
}

impl Sub for Timeval {
    type Output = Timeval;

    fn sub(self, rhs: Timeval) -> Timeval {
        // Saturates at the i64 bounds; usec differences stay within one second.
        let mut sec = self.sec.saturating_sub(rhs.sec);
        let mut usec = self.usec - rhs.usec;
        if usec < 0 {
            sec = sec.saturating_sub(1);
            usec += MICROS_PER_SEC;
        }
        Timeval { sec, usec }
    }
}

impl From<DateTime<Utc>> for Timeval {
    fn from(dt: DateTime<Utc>) -> Self {
        Self {
            sec: dt.timestamp(),
            usec: i64::from(dt.timestamp_subsec_micros()),
        }
    }
}

impl TryFrom<Timeval> for DateTime<Utc> {
    type Error = TimevalError;

    fn try_from(tv: Timeval) -> Result<Self, Self::Error> {
        let nanos = u32::try_from(tv.usec * 1_000).map_err(|_| TimevalError::OutOfRange {
            sec: tv.sec,
            usec: tv.usec,
        })?;
        DateTime::from_timestamp(tv.sec, nanos).ok_or(TimevalError::OutOfRange {
            sec: tv.sec,
            usec: tv.usec,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_without_borrow() {
        let a = Timeval::new(100, 750_000).unwrap();
        let b = Timeval::new(40, 250_000).unwrap();
        assert_eq!(a - b, Timeval { sec: 60, usec: 500_000 });
    }

    #[test]
    fn sub_borrows_micros() {
        let a = Timeval::new(100, 100_000).unwrap();
        let b = Timeval::new(40, 900_000).unwrap();
        assert_eq!(a - b, Timeval { sec: 59, usec: 200_000 });
    }

    #[test]
    fn sub_negative_is_normalized() {
        let a = Timeval::new(10, 0).unwrap();
        let b = Timeval::new(10, 500_000).unwrap();
        assert_eq!(a - b, Timeval { sec: -1, usec: 500_000 });
    }

    #[test]
    fn new_rejects_bad_micros() {
        assert_eq!(Timeval::new(0, 1_000_000), Err(TimevalError::MicrosOutOfRange(1_000_000)));
        assert_eq!(Timeval::new(0, -1), Err(TimevalError::MicrosOutOfRange(-1)));
    }

    #[test]
    fn chrono_conversion_keeps_micros() {
        let dt = DateTime::from_timestamp(1_700_000_000, 123_456_000).unwrap();
        let tv = Timeval::from(dt);
        assert_eq!(tv, Timeval { sec: 1_700_000_000, usec: 123_456 });
        assert_eq!(DateTime::<Utc>::try_from(tv), Ok(dt));
    }

    #[test]
    fn sub_saturates_at_bounds() {
        let diff = Timeval::from_secs(i64::MIN) - Timeval::new(1, 500_000).unwrap();
        assert_eq!(diff, Timeval { sec: i64::MIN, usec: 500_000 });

        let diff = Timeval::from_secs(i64::MAX) - Timeval::from_secs(-1);
        assert_eq!(diff.sec(), i64::MAX);
    }

    #[test]
    fn with_sec_keeps_micros() {
        let tv = Timeval::new(10, 250_000).unwrap().with_sec(3_610);
        assert_eq!(tv.sec(), 3_610);
        assert_eq!(tv.usec(), 250_000);
    }
}
