//! Clock port.
//!
//! Supplies the calendar "today" used by date guards and automatic
//! progress, and the instant used to stamp ledger entries. Injected so
//! tests can pin both.

use chrono::NaiveDate;

use crate::domain::foundation::Timestamp;

pub trait Clock: Send + Sync {
    /// Current calendar date in the ledger's configured zone.
    fn today(&self) -> NaiveDate;

    /// Current instant. Successive calls should not go backwards.
    fn now(&self) -> Timestamp;
}
