//! History ledger: append-only record of transitions and progress reports.
//!
//! Entries are immutable once built. `ActivityHistory` is a read view
//! over one activity's entries, ordered by timestamp.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ActivityError, ActivityStatus, ComputationMode, TransitionKind};
use crate::domain::foundation::{ActivityId, Percentage, ResourceId, StateMachine, Timestamp};

/// One accepted status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEvent {
    pub activity_id: ActivityId,
    pub timestamp: Timestamp,
    pub transition: TransitionKind,
    pub prior_status: ActivityStatus,
    pub new_status: ActivityStatus,
    pub motif: Option<String>,
    pub responsible_party: Option<ResourceId>,
    pub target_date: Option<NaiveDate>,

    /// Days supplied with this transition; only an Extend grants them.
    pub extension_days: Option<i64>,
    pub comment: Option<String>,
}

/// One accepted daily progress report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyProgressReport {
    pub activity_id: ActivityId,
    pub report_date: NaiveDate,
    pub progress_value: Percentage,
    pub computation_mode: ComputationMode,
    pub recorded_at: Timestamp,
}

/// A ledger row of either kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HistoryEntry {
    Status(StatusEvent),
    Report(DailyProgressReport),
}

impl HistoryEntry {
    pub fn activity_id(&self) -> &ActivityId {
        match self {
            HistoryEntry::Status(e) => &e.activity_id,
            HistoryEntry::Report(r) => &r.activity_id,
        }
    }

    /// Ordering key within an activity's history.
    pub fn timestamp(&self) -> Timestamp {
        match self {
            HistoryEntry::Status(e) => e.timestamp,
            HistoryEntry::Report(r) => r.recorded_at,
        }
    }

    pub fn as_status(&self) -> Option<&StatusEvent> {
        match self {
            HistoryEntry::Status(e) => Some(e),
            HistoryEntry::Report(_) => None,
        }
    }

    pub fn as_report(&self) -> Option<&DailyProgressReport> {
        match self {
            HistoryEntry::Report(r) => Some(r),
            HistoryEntry::Status(_) => None,
        }
    }
}

impl From<StatusEvent> for HistoryEntry {
    fn from(event: StatusEvent) -> Self {
        HistoryEntry::Status(event)
    }
}

impl From<DailyProgressReport> for HistoryEntry {
    fn from(report: DailyProgressReport) -> Self {
        HistoryEntry::Report(report)
    }
}

/// Why a ledger failed to replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// An event's recorded prior status disagrees with the replayed one.
    PriorStatusMismatch {
        index: usize,
        expected: ActivityStatus,
        recorded: ActivityStatus,
    },

    /// An event records an edge the state machine does not allow.
    IllegalEdge {
        index: usize,
        from: ActivityStatus,
        to: ActivityStatus,
    },
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayError::PriorStatusMismatch {
                index,
                expected,
                recorded,
            } => write!(
                f,
                "event {} records prior status {} but replay reached {}",
                index, recorded, expected
            ),
            ReplayError::IllegalEdge { index, from, to } => {
                write!(f, "event {} records illegal edge {} -> {}", index, from, to)
            }
        }
    }
}

impl std::error::Error for ReplayError {}

/// Ordered history of one activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityHistory {
    entries: Vec<HistoryEntry>,
}

impl ActivityHistory {
    /// Builds a history, sorting entries by timestamp.
    ///
    /// The sort is stable so entries sharing a timestamp keep their
    /// append order.
    pub fn new(mut entries: Vec<HistoryEntry>) -> Self {
        entries.sort_by_key(HistoryEntry::timestamp);
        Self { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn status_events(&self) -> impl Iterator<Item = &StatusEvent> {
        self.entries.iter().filter_map(HistoryEntry::as_status)
    }

    pub fn daily_reports(&self) -> impl Iterator<Item = &DailyProgressReport> {
        self.entries.iter().filter_map(HistoryEntry::as_report)
    }

    pub fn latest_status_event(&self) -> Option<&StatusEvent> {
        self.status_events().last()
    }

    /// Returns true if a report with non-zero progress exists for `date`.
    pub fn has_positive_report_on(&self, date: NaiveDate) -> bool {
        self.daily_reports()
            .any(|r| r.report_date == date && r.progress_value.is_positive())
    }

    /// Rebuilds the current status by folding the status events from
    /// `NotStarted`.
    pub fn replay_status(&self) -> Result<ActivityStatus, ReplayError> {
        let mut current = ActivityStatus::NotStarted;
        for (index, event) in self.status_events().enumerate() {
            if event.prior_status != current {
                return Err(ReplayError::PriorStatusMismatch {
                    index,
                    expected: current,
                    recorded: event.prior_status,
                });
            }
            if !current.can_transition_to(&event.new_status) {
                return Err(ReplayError::IllegalEdge {
                    index,
                    from: current,
                    to: event.new_status,
                });
            }
            current = event.new_status;
        }
        Ok(current)
    }
}

impl From<ReplayError> for ActivityError {
    fn from(err: ReplayError) -> Self {
        ActivityError::Infrastructure(format!("ledger replay failed: {}", err))
    }
}
