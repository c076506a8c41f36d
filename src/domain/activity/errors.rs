//! Activity lifecycle error types.
//!
//! Every guard the lifecycle enforces has its own variant so the host
//! application can give distinct guidance ("pick a future date" versus
//! "explain the reason").
//!
//! | Error | Retry? |
//! |-------|--------|
//! | ConcurrentModification | yes, after re-fetching |
//! | Infrastructure | yes |
//! | everything else | no |

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{ActivityStatus, ActivityVersion, TransitionKind};
use crate::domain::foundation::{ActivityId, DomainError, ErrorCode};

/// Activity-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityError {
    /// Motif missing or blank after trimming.
    EmptyMotif,

    /// Comment missing or blank where the resume path requires one.
    EmptyComment,

    /// Suspension requested without a responsible party.
    MissingResponsible,

    /// Postponement target date missing or not strictly after today.
    InvalidTargetDate {
        target: Option<NaiveDate>,
        today: NaiveDate,
    },

    /// Extension grant missing, below one day, or above the configured cap.
    InvalidExtensionDays { requested: Option<i64> },

    /// Transition not defined from the current status.
    IllegalFromState {
        current: ActivityStatus,
        transition: TransitionKind,
    },

    /// Activity is completed; nothing may change any more.
    TerminalState,

    /// Manual progress outside `[0, 100]`.
    OutOfRange(Decimal),

    /// Automatic progress requested on a zero-length planning window.
    DegeneratePlanningWindow { start: NaiveDate, end: NaiveDate },

    /// Planned end precedes planned start.
    InvalidPlanningWindow { start: NaiveDate, end: NaiveDate },

    /// A positive report already exists for that day.
    DuplicateDailyReport(NaiveDate),

    /// Status does not accept progress reports.
    NotReportable(ActivityStatus),

    /// Persisted version moved on since the caller read the activity.
    ConcurrentModification {
        expected: ActivityVersion,
        actual: ActivityVersion,
    },

    /// No activity with that id.
    NotFound(ActivityId),

    /// Infrastructure error.
    Infrastructure(String),
}

impl ActivityError {
    pub fn invalid_target_date(target: Option<NaiveDate>, today: NaiveDate) -> Self {
        ActivityError::InvalidTargetDate { target, today }
    }

    pub fn invalid_extension_days(requested: Option<i64>) -> Self {
        ActivityError::InvalidExtensionDays { requested }
    }

    pub fn illegal_from_state(current: ActivityStatus, transition: TransitionKind) -> Self {
        ActivityError::IllegalFromState {
            current,
            transition,
        }
    }

    pub fn concurrent_modification(expected: ActivityVersion, actual: ActivityVersion) -> Self {
        ActivityError::ConcurrentModification { expected, actual }
    }

    pub fn not_found(id: ActivityId) -> Self {
        ActivityError::NotFound(id)
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ActivityError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ActivityError::EmptyMotif => ErrorCode::EmptyMotif,
            ActivityError::EmptyComment => ErrorCode::EmptyComment,
            ActivityError::MissingResponsible => ErrorCode::MissingResponsible,
            ActivityError::InvalidTargetDate { .. } => ErrorCode::InvalidTargetDate,
            ActivityError::InvalidExtensionDays { .. } => ErrorCode::InvalidExtensionDays,
            ActivityError::IllegalFromState { .. } => ErrorCode::IllegalFromState,
            ActivityError::TerminalState => ErrorCode::TerminalState,
            ActivityError::OutOfRange(_) => ErrorCode::OutOfRange,
            ActivityError::DegeneratePlanningWindow { .. } => ErrorCode::DegeneratePlanningWindow,
            ActivityError::InvalidPlanningWindow { .. } => ErrorCode::InvalidPlanningWindow,
            ActivityError::DuplicateDailyReport(_) => ErrorCode::DuplicateDailyReport,
            ActivityError::NotReportable(_) => ErrorCode::NotReportable,
            ActivityError::ConcurrentModification { .. } => ErrorCode::ConcurrentModification,
            ActivityError::NotFound(_) => ErrorCode::ActivityNotFound,
            ActivityError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            ActivityError::EmptyMotif => "A reason (motif) is required".to_string(),
            ActivityError::EmptyComment => "A comment is required to resume".to_string(),
            ActivityError::MissingResponsible => {
                "A responsible party is required to suspend".to_string()
            }
            ActivityError::InvalidTargetDate { target: Some(t), today } => {
                format!("Target date {} must be after {}", t, today)
            }
            ActivityError::InvalidTargetDate { target: None, .. } => {
                "A target date is required to postpone".to_string()
            }
            ActivityError::InvalidExtensionDays { requested: Some(d) } => {
                format!("Extension of {} days is not allowed", d)
            }
            ActivityError::InvalidExtensionDays { requested: None } => {
                "A number of extension days is required".to_string()
            }
            ActivityError::IllegalFromState {
                current,
                transition,
            } => format!("Cannot {} an activity that is {}", transition, current),
            ActivityError::TerminalState => "Activity is completed".to_string(),
            ActivityError::OutOfRange(value) => {
                format!("Progress must be between 0 and 100, got {}", value)
            }
            ActivityError::DegeneratePlanningWindow { start, end } => format!(
                "Cannot compute progress automatically for window {} to {}",
                start, end
            ),
            ActivityError::InvalidPlanningWindow { start, end } => {
                format!("Planned end {} precedes planned start {}", end, start)
            }
            ActivityError::DuplicateDailyReport(date) => {
                format!("Progress has already been reported for {}", date)
            }
            ActivityError::NotReportable(status) => {
                format!("Cannot report progress on an activity that is {}", status)
            }
            ActivityError::ConcurrentModification { expected, actual } => format!(
                "Activity was modified concurrently: expected {}, found {}",
                expected, actual
            ),
            ActivityError::NotFound(id) => format!("Activity not found: {}", id),
            ActivityError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if the caller should re-fetch and retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ActivityError::ConcurrentModification { .. } | ActivityError::Infrastructure(_)
        )
    }

    /// Returns true for guard rejections (as opposed to lookup or storage failures).
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            ActivityError::NotFound(_)
                | ActivityError::ConcurrentModification { .. }
                | ActivityError::Infrastructure(_)
        )
    }
}

impl std::fmt::Display for ActivityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ActivityError {}

impl From<DomainError> for ActivityError {
    fn from(err: DomainError) -> Self {
        ActivityError::Infrastructure(err.to_string())
    }
}

impl From<ActivityError> for DomainError {
    fn from(err: ActivityError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
