//! Activity domain events.

use serde::{Deserialize, Serialize};

use super::{ActivityStatus, ActivityVersion, TransitionKind};
use crate::domain::foundation::{domain_event, ActivityId, EventId, Percentage, SiteId, Timestamp};

/// What produced an [`ActivityChanged`] event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "transition", rename_all = "snake_case")]
pub enum ChangeCause {
    Transition(TransitionKind),
    DailyReport,
}

/// Published after every accepted transition or daily report so that
/// dependent rollups (site progress, parent work items) can refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityChanged {
    pub event_id: EventId,
    pub activity_id: ActivityId,
    pub site_id: SiteId,
    pub new_status: ActivityStatus,
    pub new_progress: Percentage,
    pub cause: ChangeCause,
    pub version: ActivityVersion,
    pub occurred_at: Timestamp,
}

domain_event!(
    ActivityChanged,
    event_type = "activity.changed.v1",
    schema_version = 1,
    aggregate_id = activity_id,
    aggregate_type = "Activity",
    occurred_at = occurred_at,
    event_id = event_id
);
