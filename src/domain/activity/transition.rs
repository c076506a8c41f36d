//! Transition requests: what a caller asks for and the parameters it supplies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ActivityStatus;
use crate::domain::foundation::ResourceId;

/// A requested lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Launch,
    Suspend,
    Postpone,
    Extend,
    Resume,
    Complete,
}

impl TransitionKind {
    /// All transition kinds.
    pub const ALL: [TransitionKind; 6] = [
        TransitionKind::Launch,
        TransitionKind::Suspend,
        TransitionKind::Postpone,
        TransitionKind::Extend,
        TransitionKind::Resume,
        TransitionKind::Complete,
    ];

    /// Status the activity lands in when this transition is accepted.
    pub fn target(&self) -> ActivityStatus {
        match self {
            TransitionKind::Launch => ActivityStatus::InProgress,
            TransitionKind::Suspend => ActivityStatus::Suspended,
            TransitionKind::Postpone => ActivityStatus::Postponed,
            TransitionKind::Extend => ActivityStatus::Extended,
            TransitionKind::Resume => ActivityStatus::InProgress,
            TransitionKind::Complete => ActivityStatus::Completed,
        }
    }

    /// Returns true if this transition is defined from `current`.
    pub fn is_defined_from(&self, current: ActivityStatus) -> bool {
        use ActivityStatus::*;
        match self {
            TransitionKind::Launch => current == NotStarted,
            TransitionKind::Suspend => matches!(current, InProgress | Extended),
            TransitionKind::Postpone => matches!(current, InProgress | Extended),
            TransitionKind::Extend => matches!(current, InProgress | Suspended | Extended),
            TransitionKind::Resume => matches!(current, Suspended | Postponed),
            TransitionKind::Complete => matches!(current, InProgress | Extended),
        }
    }

    /// Returns true if the transition records a justification on the activity.
    pub fn carries_motif(&self) -> bool {
        matches!(
            self,
            TransitionKind::Suspend | TransitionKind::Postpone | TransitionKind::Extend
        )
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransitionKind::Launch => "launch",
            TransitionKind::Suspend => "suspend",
            TransitionKind::Postpone => "postpone",
            TransitionKind::Extend => "extend",
            TransitionKind::Resume => "resume",
            TransitionKind::Complete => "complete",
        };
        write!(f, "{}", s)
    }
}

/// Parameters supplied alongside a transition request.
///
/// Which fields are required depends on the transition; unused fields
/// are ignored by the validator but still recorded in the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionParams {
    pub motif: Option<String>,
    pub responsible_party: Option<ResourceId>,
    pub target_date: Option<NaiveDate>,
    pub extension_days: Option<i64>,
    pub comment: Option<String>,
}

impl TransitionParams {
    /// Empty parameter set (Launch, Complete, Resume from Postponed).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_motif(mut self, motif: impl Into<String>) -> Self {
        self.motif = Some(motif.into());
        self
    }

    pub fn with_responsible(mut self, responsible: ResourceId) -> Self {
        self.responsible_party = Some(responsible);
        self
    }

    pub fn with_target_date(mut self, date: NaiveDate) -> Self {
        self.target_date = Some(date);
        self
    }

    pub fn with_extension_days(mut self, days: i64) -> Self {
        self.extension_days = Some(days);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// The motif trimmed, or `None` if absent or blank.
    pub fn trimmed_motif(&self) -> Option<&str> {
        non_blank(self.motif.as_deref())
    }

    /// The comment trimmed, or `None` if absent or blank.
    pub fn trimmed_comment(&self) -> Option<&str> {
        non_blank(self.comment.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Tunable guard rules, sourced from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransitionPolicy {
    /// Also require a comment when resuming from `Postponed`.
    pub require_comment_on_postponed_resume: bool,

    /// Upper bound on a single extension grant, if any.
    pub max_extension_days: Option<u32>,
}
