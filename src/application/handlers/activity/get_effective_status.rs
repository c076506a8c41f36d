//! GetEffectiveStatusHandler - Query handler for the displayed status.
//!
//! Consults the site blockage signal on every call; the overlay is
//! never stored.

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::activity::{
    effective_status, ActivityError, ActivityStatus, ActivityVersion, DisplayStatus,
};
use crate::domain::foundation::{ActivityId, Percentage, SiteId};
use crate::ports::{ActivityRepository, Clock, SiteBlockageSignal};

/// Query for an activity's displayed status.
#[derive(Debug, Clone)]
pub struct GetEffectiveStatusQuery {
    pub activity_id: ActivityId,
}

/// What a consumer shows for an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveStatusView {
    pub activity_id: ActivityId,
    pub site_id: SiteId,
    pub stored_status: ActivityStatus,
    pub effective_status: DisplayStatus,
    pub progress: Percentage,
    pub planned_end: NaiveDate,
    pub remaining_days: i64,
    pub version: ActivityVersion,
}

/// Handler for displayed status.
pub struct GetEffectiveStatusHandler {
    repository: Arc<dyn ActivityRepository>,
    blockage: Arc<dyn SiteBlockageSignal>,
    clock: Arc<dyn Clock>,
}

impl GetEffectiveStatusHandler {
    pub fn new(
        repository: Arc<dyn ActivityRepository>,
        blockage: Arc<dyn SiteBlockageSignal>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            blockage,
            clock,
        }
    }

    pub async fn handle(
        &self,
        query: GetEffectiveStatusQuery,
    ) -> Result<EffectiveStatusView, ActivityError> {
        let activity = self
            .repository
            .find_by_id(&query.activity_id)
            .await?
            .ok_or_else(|| ActivityError::not_found(query.activity_id))?;

        let blocked = self.blockage.is_blocked(activity.site_id()).await?;

        Ok(EffectiveStatusView {
            activity_id: *activity.id(),
            site_id: *activity.site_id(),
            stored_status: activity.status(),
            effective_status: effective_status(&activity, blocked),
            progress: activity.progress(),
            planned_end: activity.planned_end(),
            remaining_days: activity.remaining_days(self.clock.today()),
            version: activity.version(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedClock, InMemoryActivityStore, InMemorySiteBlockage};
    use crate::domain::activity::{Activity, LifecycleEngine, TransitionKind, TransitionParams};
    use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
    use async_trait::async_trait;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn stored_activity(store: &InMemoryActivityStore, complete: bool) -> Activity {
        let activity = Activity::schedule(
            ActivityId::new(),
            SiteId::new(),
            date(2025, 1, 1),
            date(2025, 1, 11),
            Timestamp::now(),
        )
        .unwrap();
        store.insert(&activity).await.unwrap();
        if !complete {
            return activity;
        }

        let engine = LifecycleEngine::default();
        let mut current = activity;
        for kind in [TransitionKind::Launch, TransitionKind::Complete] {
            let outcome = engine
                .apply_transition(&current, kind, TransitionParams::new(), date(2025, 1, 6), Timestamp::now())
                .unwrap();
            store
                .commit(&outcome.activity, current.version(), outcome.entry())
                .await
                .unwrap();
            current = outcome.activity;
        }
        current
    }

    fn handler(
        store: Arc<InMemoryActivityStore>,
        blockage: Arc<dyn SiteBlockageSignal>,
    ) -> GetEffectiveStatusHandler {
        GetEffectiveStatusHandler::new(store, blockage, Arc::new(FixedClock::on(date(2025, 1, 6))))
    }

    #[tokio::test]
    async fn unblocked_site_shows_stored_status() {
        let store = Arc::new(InMemoryActivityStore::new());
        let activity = stored_activity(&store, false).await;
        let handler = handler(store, Arc::new(InMemorySiteBlockage::new()));

        let view = handler
            .handle(GetEffectiveStatusQuery {
                activity_id: *activity.id(),
            })
            .await
            .unwrap();

        assert_eq!(view.effective_status, DisplayStatus::NotStarted);
        assert_eq!(view.remaining_days, 5);
    }

    #[tokio::test]
    async fn blocked_site_overrides_and_recomputes_on_each_read() {
        let store = Arc::new(InMemoryActivityStore::new());
        let activity = stored_activity(&store, false).await;
        let blockage = Arc::new(InMemorySiteBlockage::new());
        let handler = handler(store.clone(), blockage.clone());
        let query = GetEffectiveStatusQuery {
            activity_id: *activity.id(),
        };

        blockage.block(*activity.site_id()).await;
        let view = handler.handle(query.clone()).await.unwrap();
        assert_eq!(view.effective_status, DisplayStatus::Blocked);
        assert_eq!(view.stored_status, ActivityStatus::NotStarted);

        blockage.unblock(activity.site_id()).await;
        let view = handler.handle(query).await.unwrap();
        assert_eq!(view.effective_status, DisplayStatus::NotStarted);

        // Overlay never reaches the store.
        let stored = store.find_by_id(activity.id()).await.unwrap().unwrap();
        assert_eq!(stored, activity);
    }

    #[tokio::test]
    async fn completed_is_never_blocked() {
        let store = Arc::new(InMemoryActivityStore::new());
        let activity = stored_activity(&store, true).await;
        let blockage = Arc::new(InMemorySiteBlockage::new());
        blockage.block(*activity.site_id()).await;
        let handler = handler(store, blockage);

        let view = handler
            .handle(GetEffectiveStatusQuery {
                activity_id: *activity.id(),
            })
            .await
            .unwrap();
        assert_eq!(view.effective_status, DisplayStatus::Completed);
    }

    struct BrokenSignal;

    #[async_trait]
    impl SiteBlockageSignal for BrokenSignal {
        async fn is_blocked(&self, _site_id: &SiteId) -> Result<bool, DomainError> {
            Err(DomainError::new(ErrorCode::InternalError, "signal offline"))
        }
    }

    #[tokio::test]
    async fn signal_failure_is_infrastructure_error() {
        let store = Arc::new(InMemoryActivityStore::new());
        let activity = stored_activity(&store, false).await;
        let handler = handler(store, Arc::new(BrokenSignal));

        let result = handler
            .handle(GetEffectiveStatusQuery {
                activity_id: *activity.id(),
            })
            .await;
        assert!(matches!(result, Err(ActivityError::Infrastructure(_))));
    }

    #[tokio::test]
    async fn unknown_activity_is_not_found() {
        let store = Arc::new(InMemoryActivityStore::new());
        let handler = handler(store, Arc::new(InMemorySiteBlockage::new()));
        let id = ActivityId::new();

        let result = handler.handle(GetEffectiveStatusQuery { activity_id: id }).await;
        assert_eq!(result.unwrap_err(), ActivityError::NotFound(id));
    }
}
