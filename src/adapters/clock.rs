//! Clock adapters.
//!
//! - `SystemClock` - wall clock, "today" taken at a fixed UTC offset
//! - `FixedClock` - settable clock for tests and replays

use chrono::{FixedOffset, NaiveDate, NaiveTime, Offset, Utc};
use std::sync::Mutex;

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Wall clock whose calendar day is evaluated at a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Timestamp::now().date_at_offset(self.offset)
    }

    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Clock that returns whatever it was last set to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<Timestamp>,
    offset: FixedOffset,
}

impl FixedClock {
    /// Clock pinned at `now`, with "today" evaluated in UTC.
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: Mutex::new(now),
            offset: Utc.fix(),
        }
    }

    /// Clock pinned at noon UTC on `date`.
    pub fn on(date: NaiveDate) -> Self {
        let noon = date.and_time(NaiveTime::MIN).and_utc() + chrono::Duration::hours(12);
        Self::new(Timestamp::from_datetime(noon))
    }

    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn set(&self, now: Timestamp) {
        *self.lock() = now;
    }

    /// Moves the clock to noon on `date`.
    pub fn set_date(&self, date: NaiveDate) {
        self.set(Self::on(date).now());
    }

    pub fn advance_secs(&self, secs: i64) {
        let mut now = self.lock();
        *now = now.plus_secs(secs);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Timestamp> {
        self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.lock().date_at_offset(self.offset)
    }

    fn now(&self) -> Timestamp {
        *self.lock()
    }
}
