use crate::humanize::Timeval;

/// Source of the current wall-clock instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timeval;
}

/// Reads the host wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timeval {
        Timeval::from(chrono::Utc::now())
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Timeval);

impl Clock for FixedClock {
    fn now(&self) -> Timeval {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timeval {
        (**self).now()
    }
}
