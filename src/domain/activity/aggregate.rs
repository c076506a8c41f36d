//! Activity aggregate entity.
//!
//! An activity is created by the scheduling side in `NotStarted` with
//! zero progress. From then on only the lifecycle engine mutates it,
//! and every accepted mutation bumps the version.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{calendar, ActivityError, ActivityStatus};
use crate::domain::foundation::{ActivityId, Percentage, ResourceId, SiteId, Timestamp};

/// Optimistic concurrency token for an activity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityVersion(u64);

impl ActivityVersion {
    /// Version of a freshly scheduled activity.
    pub fn initial() -> Self {
        Self(1)
    }

    pub fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The version that follows this one.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for ActivityVersion {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for ActivityVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A field activity whose execution state is tracked.
///
/// # Invariants
///
/// - `planned_end >= planned_start`
/// - `0 <= progress <= 100`
/// - `status` is never `Blocked`; blockage is an overlay
/// - once `Completed`, nothing changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    id: ActivityId,
    site_id: SiteId,
    planned_start: NaiveDate,
    planned_end: NaiveDate,
    status: ActivityStatus,
    progress: Percentage,
    responsible_party: Option<ResourceId>,

    /// Justification of the latest Suspend, Postpone or Extend.
    last_transition_motif: Option<String>,

    /// Total days granted across all Extend transitions.
    extension_days: Option<u32>,

    version: ActivityVersion,
    updated_at: Timestamp,
}

impl Activity {
    /// Schedules a new activity in `NotStarted` with zero progress.
    ///
    /// # Errors
    ///
    /// - `InvalidPlanningWindow` if `planned_end` precedes `planned_start`
    pub fn schedule(
        id: ActivityId,
        site_id: SiteId,
        planned_start: NaiveDate,
        planned_end: NaiveDate,
        at: Timestamp,
    ) -> Result<Self, ActivityError> {
        if planned_end < planned_start {
            return Err(ActivityError::InvalidPlanningWindow {
                start: planned_start,
                end: planned_end,
            });
        }

        Ok(Self {
            id,
            site_id,
            planned_start,
            planned_end,
            status: ActivityStatus::NotStarted,
            progress: Percentage::ZERO,
            responsible_party: None,
            last_transition_motif: None,
            extension_days: None,
            version: ActivityVersion::initial(),
            updated_at: at,
        })
    }

    /// Reconstitute an activity from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ActivityId,
        site_id: SiteId,
        planned_start: NaiveDate,
        planned_end: NaiveDate,
        status: ActivityStatus,
        progress: Percentage,
        responsible_party: Option<ResourceId>,
        last_transition_motif: Option<String>,
        extension_days: Option<u32>,
        version: ActivityVersion,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            site_id,
            planned_start,
            planned_end,
            status,
            progress,
            responsible_party,
            last_transition_motif,
            extension_days,
            version,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ActivityId {
        &self.id
    }

    pub fn site_id(&self) -> &SiteId {
        &self.site_id
    }

    pub fn planned_start(&self) -> NaiveDate {
        self.planned_start
    }

    pub fn planned_end(&self) -> NaiveDate {
        self.planned_end
    }

    pub fn status(&self) -> ActivityStatus {
        self.status
    }

    pub fn progress(&self) -> Percentage {
        self.progress
    }

    pub fn responsible_party(&self) -> Option<&ResourceId> {
        self.responsible_party.as_ref()
    }

    pub fn last_transition_motif(&self) -> Option<&str> {
        self.last_transition_motif.as_deref()
    }

    pub fn extension_days(&self) -> Option<u32> {
        self.extension_days
    }

    pub fn version(&self) -> ActivityVersion {
        self.version
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Days elapsed since the planned start (negative before it).
    pub fn elapsed_days(&self, today: NaiveDate) -> i64 {
        calendar::elapsed_days(self.planned_start, today)
    }

    /// Days left until the planned end, never negative.
    pub fn remaining_days(&self, today: NaiveDate) -> i64 {
        calendar::remaining_days(self.planned_end, today)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations (lifecycle engine only)
    // ─────────────────────────────────────────────────────────────────────────

    /// Moves the activity to `status`, carrying the accepted parameters.
    ///
    /// `grant_days` pushes the planned end out and adds to the running
    /// extension total.
    pub(super) fn apply_status_change(
        &mut self,
        status: ActivityStatus,
        motif: Option<String>,
        responsible: Option<ResourceId>,
        grant_days: Option<u32>,
        at: Timestamp,
    ) -> Result<(), ActivityError> {
        if let Some(days) = grant_days {
            let invalid = || ActivityError::invalid_extension_days(Some(i64::from(days)));
            self.planned_end = calendar::add_days(self.planned_end, days).ok_or_else(invalid)?;
            let total = self.extension_days.unwrap_or(0).checked_add(days).ok_or_else(invalid)?;
            self.extension_days = Some(total);
        }
        if motif.is_some() {
            self.last_transition_motif = motif;
        }
        if responsible.is_some() {
            self.responsible_party = responsible;
        }
        self.status = status;
        self.touch(at);
        Ok(())
    }

    /// Records a new progress value.
    pub(super) fn apply_progress(&mut self, progress: Percentage, at: Timestamp) {
        self.progress = progress;
        self.touch(at);
    }

    fn touch(&mut self, at: Timestamp) {
        self.version = self.version.next();
        self.updated_at = at;
    }
}
