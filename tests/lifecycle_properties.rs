//! Property-based tests for the lifecycle engine.
//!
//! These exercise the pure engine directly: random transition sequences,
//! arbitrary planning windows and arbitrary manual progress values.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use activity_ledger::domain::activity::{
    Activity, ActivityError, ActivityHistory, ActivityStatus, HistoryEntry, LifecycleEngine,
    ProgressCalculator, ProgressInput, TransitionKind, TransitionParams,
};
use activity_ledger::domain::foundation::{ActivityId, Percentage, ResourceId, SiteId, Timestamp};

// =============================================================================
// Strategies
// =============================================================================

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..730).prop_map(|offset| base_date() + Duration::days(offset))
}

/// A planning window with at least one day between start and end.
fn window_strategy() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (date_strategy(), 1i64..365).prop_map(|(start, len)| (start, start + Duration::days(len)))
}

fn transition_kind_strategy() -> impl Strategy<Value = TransitionKind> {
    prop::sample::select(TransitionKind::ALL.to_vec())
}

/// Manual values in hundredths, spanning well outside `[0, 100]`.
fn manual_value_strategy() -> impl Strategy<Value = Decimal> {
    (-10_000i64..=20_000).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

// =============================================================================
// Helpers
// =============================================================================

/// Parameters that satisfy every guard for `kind` on `today`.
fn valid_params(kind: TransitionKind, today: NaiveDate, days: u32) -> TransitionParams {
    let params = TransitionParams::new()
        .with_motif("Weather")
        .with_comment("Crew back on site");
    match kind {
        TransitionKind::Suspend => params.with_responsible(ResourceId::new("foreman-7").unwrap()),
        TransitionKind::Postpone => params.with_target_date(today + Duration::days(1)),
        TransitionKind::Extend => params.with_extension_days(i64::from(days)),
        _ => params,
    }
}

fn scheduled(start: NaiveDate, end: NaiveDate) -> Activity {
    Activity::schedule(
        ActivityId::new(),
        SiteId::new(),
        start,
        end,
        Timestamp::from_unix_secs(1_700_000_000).unwrap(),
    )
    .unwrap()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn auto_progress_stays_within_bounds(
        (start, end) in window_strategy(),
        today in date_strategy(),
    ) {
        let progress = ProgressCalculator::compute_auto(start, end, today).unwrap();
        prop_assert!(progress >= Percentage::ZERO);
        prop_assert!(progress <= Percentage::HUNDRED);
        if today <= start {
            prop_assert_eq!(progress, Percentage::ZERO);
        }
        if today >= end {
            prop_assert_eq!(progress, Percentage::HUNDRED);
        }
    }

    #[test]
    fn manual_progress_accepted_only_within_bounds(value in manual_value_strategy()) {
        let result = ProgressCalculator::accept_manual(value);
        if value >= Decimal::ZERO && value <= Decimal::ONE_HUNDRED {
            prop_assert_eq!(result.unwrap().value(), value);
        } else {
            prop_assert_eq!(result, Err(ActivityError::OutOfRange(value)));
        }
    }

    #[test]
    fn replaying_accepted_transitions_reconstructs_status(
        kinds in prop::collection::vec(transition_kind_strategy(), 0..40),
        (start, end) in window_strategy(),
        days in 1u32..30,
    ) {
        let engine = LifecycleEngine::default();
        let today = start;
        let mut activity = scheduled(start, end);
        let mut entries: Vec<HistoryEntry> = Vec::new();

        for (step, kind) in kinds.into_iter().enumerate() {
            let at = activity.updated_at().plus_secs(1 + step as i64);
            let before = activity.clone();
            match engine.apply_transition(&activity, kind, valid_params(kind, today, days), today, at) {
                Ok(outcome) => {
                    prop_assert!(kind.is_defined_from(before.status()));
                    prop_assert_eq!(outcome.activity.version(), before.version().next());
                    entries.push(outcome.entry());
                    activity = outcome.activity;
                }
                Err(err) => {
                    prop_assert!(err.is_rejection());
                    prop_assert_eq!(&activity, &before);
                }
            }
        }

        let history = ActivityHistory::new(entries);
        prop_assert_eq!(history.replay_status(), Ok(activity.status()));
    }

    #[test]
    fn extension_moves_planned_end_forward_by_grant(
        (start, end) in window_strategy(),
        grants in prop::collection::vec(1u32..60, 1..6),
    ) {
        let engine = LifecycleEngine::default();
        let today = start;
        let at = Timestamp::from_unix_secs(1_700_000_100).unwrap();
        let mut activity = engine
            .apply_transition(&scheduled(start, end), TransitionKind::Launch, TransitionParams::new(), today, at)
            .unwrap()
            .activity;

        let mut total = 0u32;
        for days in grants {
            let old_end = activity.planned_end();
            let outcome = engine
                .apply_transition(
                    &activity,
                    TransitionKind::Extend,
                    valid_params(TransitionKind::Extend, today, days),
                    today,
                    at,
                )
                .unwrap();
            total += days;

            prop_assert_eq!(outcome.activity.planned_end(), old_end + Duration::days(i64::from(days)));
            prop_assert!(outcome.activity.planned_end() > old_end);
            prop_assert_eq!(outcome.event.extension_days, Some(i64::from(days)));
            prop_assert_eq!(outcome.activity.extension_days(), Some(total));
            activity = outcome.activity;
        }
    }

    #[test]
    fn non_positive_extension_is_always_rejected(days in -30i64..=0) {
        let engine = LifecycleEngine::default();
        let start = base_date();
        let at = Timestamp::from_unix_secs(1_700_000_100).unwrap();
        let launched = engine
            .apply_transition(&scheduled(start, start + Duration::days(10)), TransitionKind::Launch, TransitionParams::new(), start, at)
            .unwrap()
            .activity;

        let params = TransitionParams::new().with_motif("Rain").with_extension_days(days);
        let result = engine.apply_transition(&launched, TransitionKind::Extend, params, start, at);
        let is_invalid_extension = matches!(result, Err(ActivityError::InvalidExtensionDays { .. }));
        prop_assert!(is_invalid_extension);
    }

    #[test]
    fn completed_is_final(
        kind in transition_kind_strategy(),
        input in prop_oneof![
            Just(ProgressInput::Auto),
            manual_value_strategy().prop_map(ProgressInput::Manual),
        ],
        days in 1u32..30,
    ) {
        let engine = LifecycleEngine::default();
        let start = base_date();
        let at = Timestamp::from_unix_secs(1_700_000_100).unwrap();
        let launched = engine
            .apply_transition(&scheduled(start, start + Duration::days(10)), TransitionKind::Launch, TransitionParams::new(), start, at)
            .unwrap()
            .activity;
        let completed = engine
            .apply_transition(&launched, TransitionKind::Complete, TransitionParams::new(), start, at)
            .unwrap()
            .activity;
        prop_assert_eq!(completed.status(), ActivityStatus::Completed);

        let result = engine.apply_transition(&completed, kind, valid_params(kind, start, days), start, at);
        prop_assert_eq!(result.unwrap_err(), ActivityError::TerminalState);

        let report = engine.submit_daily_report(&completed, &ActivityHistory::empty(), input, start, at);
        prop_assert_eq!(report.unwrap_err(), ActivityError::NotReportable(ActivityStatus::Completed));
    }
}
