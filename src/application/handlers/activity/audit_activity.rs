//! AuditActivityHandler - Query handler that checks a stored status
//! against the status rebuilt from its ledger.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::activity::{ActivityError, ActivityStatus, ReplayError};
use crate::domain::foundation::ActivityId;
use crate::ports::{ActivityRepository, HistoryStore};

/// Query to audit one activity.
#[derive(Debug, Clone)]
pub struct AuditActivityQuery {
    pub activity_id: ActivityId,
}

/// Outcome of an audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditActivityResult {
    pub activity_id: ActivityId,
    pub stored_status: ActivityStatus,
    /// `Err` if the ledger itself is not a valid path through the lifecycle.
    pub replayed_status: Result<ActivityStatus, ReplayError>,
}

impl AuditActivityResult {
    /// Returns true when the ledger replays to the stored status.
    pub fn is_consistent(&self) -> bool {
        self.replayed_status.as_ref() == Ok(&self.stored_status)
    }
}

/// Handler for ledger audits.
pub struct AuditActivityHandler {
    repository: Arc<dyn ActivityRepository>,
    history: Arc<dyn HistoryStore>,
}

impl AuditActivityHandler {
    pub fn new(repository: Arc<dyn ActivityRepository>, history: Arc<dyn HistoryStore>) -> Self {
        Self {
            repository,
            history,
        }
    }

    pub async fn handle(&self, query: AuditActivityQuery) -> Result<AuditActivityResult, ActivityError> {
        let activity = self
            .repository
            .find_by_id(&query.activity_id)
            .await?
            .ok_or_else(|| ActivityError::not_found(query.activity_id))?;
        let history = self.history.list_for_activity(&query.activity_id).await?;

        let result = AuditActivityResult {
            activity_id: query.activity_id,
            stored_status: activity.status(),
            replayed_status: history.replay_status(),
        };

        if result.is_consistent() {
            debug!(activity_id = %query.activity_id, status = %result.stored_status, "Audit passed");
        } else {
            warn!(
                activity_id = %query.activity_id,
                stored = %result.stored_status,
                replayed = ?result.replayed_status,
                "Ledger does not reproduce stored status"
            );
        }
        Ok(result)
    }
}
