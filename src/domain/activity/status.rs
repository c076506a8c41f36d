//! Activity status state machine and the read-time display status.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Stored execution status of a field activity.
///
/// `Blocked` is deliberately absent: blockage is a read-time overlay,
/// see [`DisplayStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    /// Scheduled, work not yet launched.
    #[default]
    NotStarted,

    /// Work under way.
    InProgress,

    /// Halted with a motif and a responsible party.
    Suspended,

    /// Pushed back to a future target date.
    Postponed,

    /// Planned end moved out; otherwise behaves like `InProgress`.
    Extended,

    /// Terminal.
    Completed,
}

impl ActivityStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [ActivityStatus; 6] = [
        ActivityStatus::NotStarted,
        ActivityStatus::InProgress,
        ActivityStatus::Suspended,
        ActivityStatus::Postponed,
        ActivityStatus::Extended,
        ActivityStatus::Completed,
    ];

    /// Returns true for `InProgress` and its `Extended` variant.
    pub fn is_working(&self) -> bool {
        matches!(self, ActivityStatus::InProgress | ActivityStatus::Extended)
    }

    /// Returns true if a daily progress report may be filed.
    pub fn accepts_reports(&self) -> bool {
        self.is_working()
    }

    /// Returns true once the activity has reached `Completed`.
    pub fn is_completed(&self) -> bool {
        matches!(self, ActivityStatus::Completed)
    }
}

impl StateMachine for ActivityStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ActivityStatus::*;
        matches!(
            (self, target),
            (NotStarted, InProgress)
                | (InProgress, Suspended)
                | (InProgress, Postponed)
                | (InProgress, Extended)
                | (InProgress, Completed)
                | (Suspended, InProgress)
                | (Suspended, Extended)
                | (Postponed, InProgress)
                | (Extended, Suspended)
                | (Extended, Postponed)
                | (Extended, Extended)
                | (Extended, Completed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ActivityStatus::*;
        match self {
            NotStarted => vec![InProgress],
            InProgress => vec![Suspended, Postponed, Extended, Completed],
            Suspended => vec![InProgress, Extended],
            Postponed => vec![InProgress],
            Extended => vec![Suspended, Postponed, Extended, Completed],
            Completed => vec![],
        }
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActivityStatus::NotStarted => "Not Started",
            ActivityStatus::InProgress => "In Progress",
            ActivityStatus::Suspended => "Suspended",
            ActivityStatus::Postponed => "Postponed",
            ActivityStatus::Extended => "Extended",
            ActivityStatus::Completed => "Completed",
        };
        write!(f, "{}", s)
    }
}

/// Status shown to consumers: the stored status, or `Blocked` when the
/// site overlay applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStatus {
    NotStarted,
    InProgress,
    Suspended,
    Postponed,
    Extended,
    Completed,
    Blocked,
}

impl DisplayStatus {
    /// Returns true if this is the overlay rather than a stored status.
    pub fn is_blocked(&self) -> bool {
        matches!(self, DisplayStatus::Blocked)
    }
}

impl From<ActivityStatus> for DisplayStatus {
    fn from(status: ActivityStatus) -> Self {
        match status {
            ActivityStatus::NotStarted => DisplayStatus::NotStarted,
            ActivityStatus::InProgress => DisplayStatus::InProgress,
            ActivityStatus::Suspended => DisplayStatus::Suspended,
            ActivityStatus::Postponed => DisplayStatus::Postponed,
            ActivityStatus::Extended => DisplayStatus::Extended,
            ActivityStatus::Completed => DisplayStatus::Completed,
        }
    }
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayStatus::NotStarted => write!(f, "{}", ActivityStatus::NotStarted),
            DisplayStatus::InProgress => write!(f, "{}", ActivityStatus::InProgress),
            DisplayStatus::Suspended => write!(f, "{}", ActivityStatus::Suspended),
            DisplayStatus::Postponed => write!(f, "{}", ActivityStatus::Postponed),
            DisplayStatus::Extended => write!(f, "{}", ActivityStatus::Extended),
            DisplayStatus::Completed => write!(f, "{}", ActivityStatus::Completed),
            DisplayStatus::Blocked => write!(f, "Blocked"),
        }
    }
}
