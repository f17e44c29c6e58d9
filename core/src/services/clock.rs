//! Time source bound to the reference time zone.
//!
//! Every timestamp the gate produces or compares comes from a `Clock`, so the
//! zone is always explicit and tests can pin time.

use chrono::{DateTime, Duration, FixedOffset, Utc};
use chrono_tz::Tz;
use std::sync::Mutex;

/// Source of the current instant in the reference time zone
pub trait Clock: Send + Sync {
    /// Current instant, expressed with the reference zone's offset
    fn now(&self) -> DateTime<FixedOffset>;

    /// The reference time zone
    fn zone(&self) -> Tz;
}

/// Wall-clock time in a fixed reference zone
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    zone: Tz,
}

impl SystemClock {
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.zone).fixed_offset()
    }

    fn zone(&self) -> Tz {
        self.zone
    }
}

/// Settable clock for tests and demos
#[derive(Debug)]
pub struct ManualClock {
    zone: Tz,
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`
    pub fn new(zone: Tz, start: DateTime<Utc>) -> Self {
        Self {
            zone,
            now: Mutex::new(start),
        }
    }

    /// Jump to an absolute instant
    pub fn set(&self, instant: DateTime<Utc>) {
        let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now = instant;
    }

    /// Move the clock forward (or backward with a negative duration)
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let now = *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        now.with_timezone(&self.zone).fixed_offset()
    }

    fn zone(&self) -> Tz {
        self.zone
    }
}
