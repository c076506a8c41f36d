//! Activity lifecycle engine.
//!
//! Pure and synchronous: callers fetch the activity and its history,
//! pass them in together with `today` and a timestamp, and persist the
//! returned activity and ledger entry as one unit. On any rejection the
//! input activity is untouched and nothing is returned to persist.

use chrono::NaiveDate;
use tracing::debug;

use super::{
    Activity, ActivityChanged, ActivityError, ActivityHistory, ChangeCause, DailyProgressReport,
    HistoryEntry, ProgressCalculator, ProgressInput, StatusEvent, TransitionKind,
    TransitionParams, TransitionPolicy, TransitionValidator,
};
use crate::domain::foundation::{EventId, Timestamp};

/// Result of an accepted transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    /// Activity after the transition, version bumped.
    pub activity: Activity,
    /// Ledger row to append.
    pub event: StatusEvent,
    /// Notification for dependent views.
    pub change: ActivityChanged,
}

impl TransitionOutcome {
    pub fn entry(&self) -> HistoryEntry {
        HistoryEntry::Status(self.event.clone())
    }
}

/// Result of an accepted daily report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutcome {
    pub activity: Activity,
    pub report: DailyProgressReport,
    pub change: ActivityChanged,
}

impl ReportOutcome {
    pub fn entry(&self) -> HistoryEntry {
        HistoryEntry::Report(self.report.clone())
    }
}

/// Applies validated transitions and progress reports to activities.
#[derive(Debug, Clone, Copy, Default)]
pub struct LifecycleEngine {
    validator: TransitionValidator,
}

impl LifecycleEngine {
    pub fn new(policy: TransitionPolicy) -> Self {
        Self {
            validator: TransitionValidator::new(policy),
        }
    }

    pub fn validator(&self) -> &TransitionValidator {
        &self.validator
    }

    /// Validates and applies `kind` to a copy of `activity`.
    pub fn apply_transition(
        &self,
        activity: &Activity,
        kind: TransitionKind,
        params: TransitionParams,
        today: NaiveDate,
        at: Timestamp,
    ) -> Result<TransitionOutcome, ActivityError> {
        let prior = activity.status();
        let target = self
            .validator
            .validate(prior, kind, &params, today)
            .map_err(|err| {
                debug!(
                    activity_id = %activity.id(),
                    transition = %kind,
                    from = %prior,
                    code = %err.code(),
                    "Transition rejected"
                );
                err
            })?;

        let grant_days = match kind {
            TransitionKind::Extend => Some(
                params
                    .extension_days
                    .and_then(|d| u32::try_from(d).ok())
                    .ok_or(ActivityError::invalid_extension_days(params.extension_days))?,
            ),
            _ => None,
        };
        let motif = params.trimmed_motif().map(str::to_string);
        let comment = params.trimmed_comment().map(str::to_string);

        let mut updated = activity.clone();
        updated.apply_status_change(
            target,
            if kind.carries_motif() { motif.clone() } else { None },
            params.responsible_party.clone(),
            grant_days,
            at,
        )?;

        let event = StatusEvent {
            activity_id: *activity.id(),
            timestamp: at,
            transition: kind,
            prior_status: prior,
            new_status: target,
            motif,
            responsible_party: params.responsible_party,
            target_date: params.target_date,
            extension_days: params.extension_days,
            comment,
        };
        let change = changed(&updated, ChangeCause::Transition(kind), at);

        debug!(
            activity_id = %updated.id(),
            transition = %kind,
            from = %prior,
            to = %target,
            version = %updated.version(),
            "Transition applied"
        );

        Ok(TransitionOutcome {
            activity: updated,
            event,
            change,
        })
    }

    /// Files today's progress report against a copy of `activity`.
    ///
    /// `history` must be the activity's current ledger; it is consulted
    /// for the one-positive-report-per-day rule.
    pub fn submit_daily_report(
        &self,
        activity: &Activity,
        history: &ActivityHistory,
        input: ProgressInput,
        today: NaiveDate,
        at: Timestamp,
    ) -> Result<ReportOutcome, ActivityError> {
        let status = activity.status();
        if !status.accepts_reports() {
            debug!(activity_id = %activity.id(), status = %status, "Report rejected: not reportable");
            return Err(ActivityError::NotReportable(status));
        }
        if history.has_positive_report_on(today) {
            debug!(activity_id = %activity.id(), date = %today, "Report rejected: duplicate");
            return Err(ActivityError::DuplicateDailyReport(today));
        }

        let progress = ProgressCalculator::resolve(
            input,
            activity.planned_start(),
            activity.planned_end(),
            today,
        )?;

        let mut updated = activity.clone();
        updated.apply_progress(progress, at);

        let report = DailyProgressReport {
            activity_id: *activity.id(),
            report_date: today,
            progress_value: progress,
            computation_mode: input.mode(),
            recorded_at: at,
        };
        let change = changed(&updated, ChangeCause::DailyReport, at);

        debug!(
            activity_id = %updated.id(),
            progress = %progress,
            mode = %input.mode(),
            version = %updated.version(),
            "Daily report recorded"
        );

        Ok(ReportOutcome {
            activity: updated,
            report,
            change,
        })
    }
}

fn changed(activity: &Activity, cause: ChangeCause, at: Timestamp) -> ActivityChanged {
    ActivityChanged {
        event_id: EventId::new(),
        activity_id: *activity.id(),
        site_id: *activity.site_id(),
        new_status: activity.status(),
        new_progress: activity.progress(),
        cause,
        version: activity.version(),
        occurred_at: at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::activity::{ActivityStatus, ComputationMode};
    use crate::domain::foundation::{ActivityId, Percentage, ResourceId, SiteId};
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2025, 1, 6)
    }

    fn engine() -> LifecycleEngine {
        LifecycleEngine::default()
    }

    fn scheduled() -> Activity {
        Activity::schedule(
            ActivityId::new(),
            SiteId::new(),
            date(2025, 1, 1),
            date(2025, 1, 11),
            Timestamp::now(),
        )
        .unwrap()
    }

    fn launched() -> Activity {
        engine()
            .apply_transition(
                &scheduled(),
                TransitionKind::Launch,
                TransitionParams::new(),
                today(),
                Timestamp::now(),
            )
            .unwrap()
            .activity
    }

    fn foreman() -> ResourceId {
        ResourceId::new("foreman-7").unwrap()
    }

    #[test]
    fn launch_records_event_and_bumps_version() {
        let activity = scheduled();
        let outcome = engine()
            .apply_transition(
                &activity,
                TransitionKind::Launch,
                TransitionParams::new(),
                today(),
                Timestamp::now(),
            )
            .unwrap();

        assert_eq!(outcome.activity.status(), ActivityStatus::InProgress);
        assert_eq!(outcome.activity.version(), activity.version().next());
        assert_eq!(outcome.event.prior_status, ActivityStatus::NotStarted);
        assert_eq!(outcome.event.new_status, ActivityStatus::InProgress);
        assert_eq!(outcome.change.new_status, ActivityStatus::InProgress);
        assert_eq!(outcome.change.version, outcome.activity.version());
        assert_eq!(
            outcome.change.cause,
            ChangeCause::Transition(TransitionKind::Launch)
        );
    }

    #[test]
    fn rejected_transition_leaves_activity_untouched() {
        let activity = launched();
        let before = activity.clone();

        let result = engine().apply_transition(
            &activity,
            TransitionKind::Suspend,
            TransitionParams::new().with_motif(""),
            today(),
            Timestamp::now(),
        );

        assert_eq!(result, Err(ActivityError::EmptyMotif));
        assert_eq!(activity, before);
    }

    #[test]
    fn suspend_stores_responsible_and_motif() {
        let outcome = engine()
            .apply_transition(
                &launched(),
                TransitionKind::Suspend,
                TransitionParams::new()
                    .with_motif("  Rain  ")
                    .with_responsible(foreman()),
                today(),
                Timestamp::now(),
            )
            .unwrap();

        assert_eq!(outcome.activity.status(), ActivityStatus::Suspended);
        assert_eq!(outcome.activity.responsible_party(), Some(&foreman()));
        assert_eq!(outcome.activity.last_transition_motif(), Some("Rain"));
        assert_eq!(outcome.event.motif.as_deref(), Some("Rain"));
        assert_eq!(outcome.event.responsible_party, Some(foreman()));
    }

    #[test]
    fn extend_moves_planned_end_by_granted_days() {
        let activity = launched();
        let outcome = engine()
            .apply_transition(
                &activity,
                TransitionKind::Extend,
                TransitionParams::new()
                    .with_motif("Extra scope")
                    .with_extension_days(5),
                today(),
                Timestamp::now(),
            )
            .unwrap();

        assert_eq!(outcome.activity.status(), ActivityStatus::Extended);
        assert_eq!(outcome.activity.planned_end(), date(2025, 1, 16));
        assert_eq!(outcome.activity.extension_days(), Some(5));
        assert_eq!(outcome.event.extension_days, Some(5));
    }

    #[test]
    fn postpone_records_target_date_without_moving_plan() {
        let activity = launched();
        let target = date(2025, 2, 1);
        let outcome = engine()
            .apply_transition(
                &activity,
                TransitionKind::Postpone,
                TransitionParams::new()
                    .with_motif("Permit pending")
                    .with_target_date(target),
                today(),
                Timestamp::now(),
            )
            .unwrap();

        assert_eq!(outcome.activity.status(), ActivityStatus::Postponed);
        assert_eq!(outcome.event.target_date, Some(target));
        assert_eq!(outcome.activity.planned_end(), activity.planned_end());
    }

    #[test]
    fn resume_comment_is_recorded_but_motif_kept() {
        let suspended = engine()
            .apply_transition(
                &launched(),
                TransitionKind::Suspend,
                TransitionParams::new()
                    .with_motif("Rain")
                    .with_responsible(foreman()),
                today(),
                Timestamp::now(),
            )
            .unwrap()
            .activity;

        let outcome = engine()
            .apply_transition(
                &suspended,
                TransitionKind::Resume,
                TransitionParams::new().with_comment("Dry again"),
                today(),
                Timestamp::now(),
            )
            .unwrap();

        assert_eq!(outcome.activity.status(), ActivityStatus::InProgress);
        assert_eq!(outcome.event.comment.as_deref(), Some("Dry again"));
        assert_eq!(outcome.activity.last_transition_motif(), Some("Rain"));
    }

    #[test]
    fn event_records_every_supplied_param() {
        let target = date(2025, 2, 1);
        let outcome = engine()
            .apply_transition(
                &launched(),
                TransitionKind::Complete,
                TransitionParams::new()
                    .with_motif("Handover")
                    .with_comment("Signed off")
                    .with_responsible(foreman())
                    .with_target_date(target)
                    .with_extension_days(3),
                today(),
                Timestamp::now(),
            )
            .unwrap();

        assert_eq!(outcome.event.motif.as_deref(), Some("Handover"));
        assert_eq!(outcome.event.comment.as_deref(), Some("Signed off"));
        assert_eq!(outcome.event.responsible_party, Some(foreman()));
        assert_eq!(outcome.event.target_date, Some(target));
        assert_eq!(outcome.event.extension_days, Some(3));
        // Only Extend grants days.
        assert_eq!(outcome.activity.planned_end(), date(2025, 1, 11));
        assert_eq!(outcome.activity.extension_days(), None);
    }

    #[test]
    fn auto_report_on_in_progress_activity() {
        let activity = launched();
        let outcome = engine()
            .submit_daily_report(
                &activity,
                &ActivityHistory::empty(),
                ProgressInput::Auto,
                today(),
                Timestamp::now(),
            )
            .unwrap();

        assert_eq!(outcome.activity.progress(), Percentage::from_whole(50));
        assert_eq!(outcome.report.computation_mode, ComputationMode::Auto);
        assert_eq!(outcome.report.report_date, today());
        assert_eq!(outcome.change.cause, ChangeCause::DailyReport);
        assert_eq!(outcome.activity.version(), activity.version().next());
    }

    #[test]
    fn second_positive_report_same_day_is_duplicate() {
        let activity = launched();
        let first = engine()
            .submit_daily_report(
                &activity,
                &ActivityHistory::empty(),
                ProgressInput::Manual(Decimal::from(30)),
                today(),
                Timestamp::now(),
            )
            .unwrap();
        let history = ActivityHistory::new(vec![first.entry()]);

        let second = engine().submit_daily_report(
            &first.activity,
            &history,
            ProgressInput::Manual(Decimal::from(35)),
            today(),
            Timestamp::now(),
        );
        assert_eq!(second, Err(ActivityError::DuplicateDailyReport(today())));
    }

    #[test]
    fn zero_report_does_not_block_later_report() {
        let activity = launched();
        let first = engine()
            .submit_daily_report(
                &activity,
                &ActivityHistory::empty(),
                ProgressInput::Manual(Decimal::ZERO),
                today(),
                Timestamp::now(),
            )
            .unwrap();
        let history = ActivityHistory::new(vec![first.entry()]);

        assert!(engine()
            .submit_daily_report(
                &first.activity,
                &history,
                ProgressInput::Manual(Decimal::from(10)),
                today(),
                Timestamp::now(),
            )
            .is_ok());
    }

    #[test]
    fn report_on_not_started_is_not_reportable() {
        assert_eq!(
            engine().submit_daily_report(
                &scheduled(),
                &ActivityHistory::empty(),
                ProgressInput::Auto,
                today(),
                Timestamp::now(),
            ),
            Err(ActivityError::NotReportable(ActivityStatus::NotStarted))
        );
    }

    #[test]
    fn manual_out_of_range_is_rejected() {
        let value = Decimal::from(120);
        assert_eq!(
            engine().submit_daily_report(
                &launched(),
                &ActivityHistory::empty(),
                ProgressInput::Manual(value),
                today(),
                Timestamp::now(),
            ),
            Err(ActivityError::OutOfRange(value))
        );
    }

    #[test]
    fn auto_on_degenerate_window_is_rejected() {
        let d = date(2025, 1, 6);
        let activity =
            Activity::schedule(ActivityId::new(), SiteId::new(), d, d, Timestamp::now()).unwrap();
        let activity = engine()
            .apply_transition(
                &activity,
                TransitionKind::Launch,
                TransitionParams::new(),
                d,
                Timestamp::now(),
            )
            .unwrap()
            .activity;

        assert_eq!(
            engine().submit_daily_report(
                &activity,
                &ActivityHistory::empty(),
                ProgressInput::Auto,
                d,
                Timestamp::now(),
            ),
            Err(ActivityError::DegeneratePlanningWindow { start: d, end: d })
        );
    }

    #[test]
    fn complete_does_not_force_full_progress() {
        let outcome = engine()
            .apply_transition(
                &launched(),
                TransitionKind::Complete,
                TransitionParams::new(),
                today(),
                Timestamp::now(),
            )
            .unwrap();
        assert_eq!(outcome.activity.status(), ActivityStatus::Completed);
        assert_eq!(outcome.activity.progress(), Percentage::ZERO);
    }
}
