//! Status transition validator.
//!
//! Decides whether a requested transition is legal from the current
//! status with the supplied parameters. Pure: no clock, no storage.
//!
//! Guards are checked in a fixed order so that a request violating
//! several of them always yields the same rejection:
//!
//! 1. terminal status
//! 2. transition not defined from the current status
//! 3. motif (Suspend, Postpone, Extend)
//! 4. responsible party (Suspend)
//! 5. per-transition parameters (target date, extension days, comment)

use chrono::NaiveDate;

use super::{ActivityError, ActivityStatus, TransitionKind, TransitionParams, TransitionPolicy};
use crate::domain::foundation::StateMachine;

/// Validates transition requests against the lifecycle rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionValidator {
    policy: TransitionPolicy,
}

impl TransitionValidator {
    pub fn new(policy: TransitionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &TransitionPolicy {
        &self.policy
    }

    /// Returns the status the activity would land in, or the first guard
    /// the request violates.
    pub fn validate(
        &self,
        current: ActivityStatus,
        kind: TransitionKind,
        params: &TransitionParams,
        today: NaiveDate,
    ) -> Result<ActivityStatus, ActivityError> {
        if current.is_terminal() {
            return Err(ActivityError::TerminalState);
        }
        if !kind.is_defined_from(current) {
            return Err(ActivityError::illegal_from_state(current, kind));
        }

        if kind.carries_motif() && params.trimmed_motif().is_none() {
            return Err(ActivityError::EmptyMotif);
        }

        match kind {
            TransitionKind::Suspend => {
                if params.responsible_party.is_none() {
                    return Err(ActivityError::MissingResponsible);
                }
            }
            TransitionKind::Postpone => match params.target_date {
                Some(target) if target > today => {}
                other => return Err(ActivityError::invalid_target_date(other, today)),
            },
            TransitionKind::Extend => self.check_extension_days(params.extension_days)?,
            TransitionKind::Resume => self.check_resume_comment(current, params)?,
            TransitionKind::Launch | TransitionKind::Complete => {}
        }

        Ok(kind.target())
    }

    fn check_extension_days(&self, requested: Option<i64>) -> Result<(), ActivityError> {
        let days = match requested {
            Some(d) if d >= 1 => d,
            other => return Err(ActivityError::invalid_extension_days(other)),
        };
        if let Some(max) = self.policy.max_extension_days {
            if days > i64::from(max) {
                return Err(ActivityError::invalid_extension_days(requested));
            }
        }
        Ok(())
    }

    fn check_resume_comment(
        &self,
        current: ActivityStatus,
        params: &TransitionParams,
    ) -> Result<(), ActivityError> {
        let required = match current {
            ActivityStatus::Suspended => true,
            ActivityStatus::Postponed => self.policy.require_comment_on_postponed_resume,
            _ => false,
        };
        if required && params.trimmed_comment().is_none() {
            return Err(ActivityError::EmptyComment);
        }
        Ok(())
    }
}
