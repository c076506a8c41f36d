//! Activity command and query handlers.

mod apply_transition;
mod audit_activity;
mod get_activity_history;
mod get_effective_status;
mod submit_daily_report;

pub use apply_transition::{ApplyTransitionCommand, ApplyTransitionHandler, ApplyTransitionResult};
pub use audit_activity::{AuditActivityHandler, AuditActivityQuery, AuditActivityResult};
pub use get_activity_history::{
    GetActivityHistoryHandler, GetActivityHistoryQuery, HistoryView, HistoryViewEntry,
};
pub use get_effective_status::{
    EffectiveStatusView, GetEffectiveStatusHandler, GetEffectiveStatusQuery,
};
pub use submit_daily_report::{
    SubmitDailyReportCommand, SubmitDailyReportHandler, SubmitDailyReportResult,
};

use tracing::warn;

use crate::domain::activity::{Activity, ActivityChanged, ActivityError, ActivityVersion};
use crate::domain::foundation::{ActivityId, CommandMetadata, EventEnvelope};
use crate::ports::{ActivityRepository, EventPublisher};

/// Loads an activity and fails fast when the caller's view is stale.
async fn load_expecting(
    repository: &dyn ActivityRepository,
    id: &ActivityId,
    expected: ActivityVersion,
) -> Result<Activity, ActivityError> {
    let activity = repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ActivityError::not_found(*id))?;
    if activity.version() != expected {
        return Err(ActivityError::concurrent_modification(
            expected,
            activity.version(),
        ));
    }
    Ok(activity)
}

/// Publishes a committed change.
///
/// The commit has already happened, so a delivery failure is logged
/// rather than reported; the caller still receives the change in its
/// result.
async fn publish_change(
    publisher: &dyn EventPublisher,
    change: &ActivityChanged,
    metadata: &CommandMetadata,
) {
    let envelope = match EventEnvelope::from_event(change) {
        Ok(envelope) => envelope,
        Err(err) => {
            warn!(activity_id = %change.activity_id, error = %err, "Failed to encode change event");
            return;
        }
    };

    let mut envelope = envelope
        .with_correlation_id(metadata.correlation_id())
        .with_actor(metadata.actor.as_str());
    if let Some(trace_id) = metadata.trace_id() {
        envelope = envelope.with_trace_id(trace_id);
    }

    if let Err(err) = publisher.publish(envelope).await {
        warn!(activity_id = %change.activity_id, error = %err, "Failed to publish change event");
    }
}
