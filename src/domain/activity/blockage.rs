//! Blockage overlay.
//!
//! A site-wide blockage hides the stored status behind `Blocked` at
//! read time. Nothing here is persisted; callers recompute on every read
//! from the current signal.

use super::{Activity, ActivityStatus, DisplayStatus};

/// Status to show for a stored status under the given blockage signal.
///
/// `Completed` is terminal and is never overridden.
pub fn overlay(status: ActivityStatus, site_blocked: bool) -> DisplayStatus {
    if site_blocked && !status.is_completed() {
        DisplayStatus::Blocked
    } else {
        DisplayStatus::from(status)
    }
}

/// Status to show for `activity` given its site's blockage signal.
pub fn effective_status(activity: &Activity, site_blocked: bool) -> DisplayStatus {
    overlay(activity.status(), site_blocked)
}
