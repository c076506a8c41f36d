//! In-Memory Activity Store Adapter
//!
//! Holds activities and their ledgers behind one lock so that a commit
//! (version check, record replace, ledger append) is a single critical
//! section. Useful for testing and for embedding without a database.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::activity::{Activity, ActivityHistory, ActivityVersion, HistoryEntry};
use crate::domain::foundation::ActivityId;
use crate::ports::{ActivityRepository, HistoryStore, StoreError};

#[derive(Debug, Default)]
struct Tables {
    activities: HashMap<ActivityId, Activity>,
    history: HashMap<ActivityId, Vec<HistoryEntry>>,
}

impl Tables {
    fn check_version(
        &self,
        id: &ActivityId,
        expected: ActivityVersion,
    ) -> Result<(), StoreError> {
        let stored = self
            .activities
            .get(id)
            .ok_or(StoreError::NotFound(*id))?;
        if stored.version() != expected {
            warn!(
                activity_id = %id,
                expected = %expected,
                actual = %stored.version(),
                "Rejected stale write"
            );
            return Err(StoreError::ConcurrentModification {
                expected,
                actual: stored.version(),
            });
        }
        Ok(())
    }
}

/// In-memory activity repository and history store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActivityStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryActivityStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored activities
    pub async fn activity_count(&self) -> usize {
        self.tables.read().await.activities.len()
    }

    /// Number of ledger entries for an activity
    pub async fn entry_count(&self, id: &ActivityId) -> usize {
        self.tables
            .read()
            .await
            .history
            .get(id)
            .map_or(0, Vec::len)
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        let mut tables = self.tables.write().await;
        tables.activities.clear();
        tables.history.clear();
    }
}

#[async_trait]
impl ActivityRepository for InMemoryActivityStore {
    async fn find_by_id(&self, id: &ActivityId) -> Result<Option<Activity>, StoreError> {
        Ok(self.tables.read().await.activities.get(id).cloned())
    }

    async fn insert(&self, activity: &Activity) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.activities.contains_key(activity.id()) {
            return Err(StoreError::AlreadyExists(*activity.id()));
        }
        tables.activities.insert(*activity.id(), activity.clone());
        debug!(activity_id = %activity.id(), "Activity inserted");
        Ok(())
    }

    async fn save(&self, activity: &Activity, expected: ActivityVersion) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.check_version(activity.id(), expected)?;
        tables.activities.insert(*activity.id(), activity.clone());
        Ok(())
    }

    async fn commit(
        &self,
        activity: &Activity,
        expected: ActivityVersion,
        entry: HistoryEntry,
    ) -> Result<(), StoreError> {
        if entry.activity_id() != activity.id() {
            return Err(StoreError::Storage(format!(
                "ledger entry for {} committed with activity {}",
                entry.activity_id(),
                activity.id()
            )));
        }

        let mut tables = self.tables.write().await;
        tables.check_version(activity.id(), expected)?;
        tables.activities.insert(*activity.id(), activity.clone());
        tables.history.entry(*activity.id()).or_default().push(entry);
        debug!(
            activity_id = %activity.id(),
            version = %activity.version(),
            "Activity committed"
        );
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for InMemoryActivityStore {
    async fn append(&self, entry: HistoryEntry) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables
            .history
            .entry(*entry.activity_id())
            .or_default()
            .push(entry);
        Ok(())
    }

    async fn list_for_activity(&self, id: &ActivityId) -> Result<ActivityHistory, StoreError> {
        let tables = self.tables.read().await;
        let entries = tables.history.get(id).cloned().unwrap_or_default();
        Ok(ActivityHistory::new(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::activity::{
        ActivityStatus, LifecycleEngine, TransitionKind, TransitionParams,
    };
    use crate::domain::foundation::{SiteId, Timestamp};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
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

    #[tokio::test]
    async fn insert_then_find() {
        let store = InMemoryActivityStore::new();
        let activity = scheduled();
        store.insert(&activity).await.unwrap();

        let found = store.find_by_id(activity.id()).await.unwrap();
        assert_eq!(found, Some(activity));
        assert_eq!(store.activity_count().await, 1);
    }

    #[tokio::test]
    async fn insert_twice_fails() {
        let store = InMemoryActivityStore::new();
        let activity = scheduled();
        store.insert(&activity).await.unwrap();

        assert_eq!(
            store.insert(&activity).await,
            Err(StoreError::AlreadyExists(*activity.id()))
        );
    }

    #[tokio::test]
    async fn find_missing_returns_none() {
        let store = InMemoryActivityStore::new();
        assert_eq!(store.find_by_id(&ActivityId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn commit_writes_record_and_entry() {
        let store = InMemoryActivityStore::new();
        let activity = scheduled();
        store.insert(&activity).await.unwrap();

        let outcome = LifecycleEngine::default()
            .apply_transition(
                &activity,
                TransitionKind::Launch,
                TransitionParams::new(),
                date(2025, 1, 2),
                Timestamp::now(),
            )
            .unwrap();
        store
            .commit(&outcome.activity, activity.version(), outcome.entry())
            .await
            .unwrap();

        let stored = store.find_by_id(activity.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), ActivityStatus::InProgress);
        let history = store.list_for_activity(activity.id()).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.replay_status(), Ok(ActivityStatus::InProgress));
    }

    #[tokio::test]
    async fn stale_commit_is_rejected_and_changes_nothing() {
        let store = InMemoryActivityStore::new();
        let activity = scheduled();
        store.insert(&activity).await.unwrap();

        let engine = LifecycleEngine::default();
        let launch = engine
            .apply_transition(
                &activity,
                TransitionKind::Launch,
                TransitionParams::new(),
                date(2025, 1, 2),
                Timestamp::now(),
            )
            .unwrap();
        store
            .commit(&launch.activity, activity.version(), launch.entry())
            .await
            .unwrap();

        // Same base version a second time.
        let result = store
            .commit(&launch.activity, activity.version(), launch.entry())
            .await;
        assert_eq!(
            result,
            Err(StoreError::ConcurrentModification {
                expected: activity.version(),
                actual: launch.activity.version(),
            })
        );
        assert_eq!(store.entry_count(activity.id()).await, 1);
    }

    #[tokio::test]
    async fn save_on_missing_activity_is_not_found() {
        let store = InMemoryActivityStore::new();
        let activity = scheduled();
        assert_eq!(
            store.save(&activity, activity.version()).await,
            Err(StoreError::NotFound(*activity.id()))
        );
    }

    #[tokio::test]
    async fn commit_rejects_entry_for_other_activity() {
        let store = InMemoryActivityStore::new();
        let a = scheduled();
        let b = scheduled();
        store.insert(&a).await.unwrap();

        let outcome = LifecycleEngine::default()
            .apply_transition(
                &b,
                TransitionKind::Launch,
                TransitionParams::new(),
                date(2025, 1, 2),
                Timestamp::now(),
            )
            .unwrap();
        let result = store.commit(&a, a.version(), outcome.entry()).await;
        assert!(matches!(result, Err(StoreError::Storage(_))));
        assert_eq!(store.entry_count(a.id()).await, 0);
    }

    #[tokio::test]
    async fn clear_empties_store() {
        let store = InMemoryActivityStore::new();
        store.insert(&scheduled()).await.unwrap();
        store.clear().await;
        assert_eq!(store.activity_count().await, 0);
    }
}
