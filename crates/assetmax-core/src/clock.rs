//! Injectable time source
//!
//! Generated output embeds timestamps. Taking the clock as a capability lets
//! tests pin "now" and compare output byte-for-byte.

use chrono::{DateTime, SecondsFormat, Utc};

/// A source of the current instant
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// ISO-8601 UTC timestamp with millisecond precision, e.g. `2025-01-02T03:04:05.000Z`
    fn timestamp(&self) -> String {
        self.now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
