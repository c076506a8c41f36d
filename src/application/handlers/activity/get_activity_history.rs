//! GetActivityHistoryHandler - Query handler for the merged ledger view.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::activity::{ActivityError, HistoryEntry};
use crate::domain::foundation::{ActivityId, ResourceId};
use crate::ports::{ActivityRepository, HistoryStore, ResourceDirectory};

/// Query for an activity's full history.
#[derive(Debug, Clone)]
pub struct GetActivityHistoryQuery {
    pub activity_id: ActivityId,
}

/// One ledger row with its responsible party resolved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryViewEntry {
    pub entry: HistoryEntry,
    /// Directory name, or the raw id when the directory does not know it.
    pub responsible_name: Option<String>,
}

/// Timestamp-ordered history of one activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryView {
    pub activity_id: ActivityId,
    pub entries: Vec<HistoryViewEntry>,
}

/// Handler for history queries.
pub struct GetActivityHistoryHandler {
    repository: Arc<dyn ActivityRepository>,
    history: Arc<dyn HistoryStore>,
    directory: Arc<dyn ResourceDirectory>,
}

impl GetActivityHistoryHandler {
    pub fn new(
        repository: Arc<dyn ActivityRepository>,
        history: Arc<dyn HistoryStore>,
        directory: Arc<dyn ResourceDirectory>,
    ) -> Self {
        Self {
            repository,
            history,
            directory,
        }
    }

    pub async fn handle(&self, query: GetActivityHistoryQuery) -> Result<HistoryView, ActivityError> {
        if self.repository.find_by_id(&query.activity_id).await?.is_none() {
            return Err(ActivityError::not_found(query.activity_id));
        }

        let history = self.history.list_for_activity(&query.activity_id).await?;

        let mut names: HashMap<ResourceId, String> = HashMap::new();
        let mut entries = Vec::with_capacity(history.len());
        for entry in history.entries() {
            let responsible = entry
                .as_status()
                .and_then(|event| event.responsible_party.as_ref());
            let responsible_name = match responsible {
                Some(id) => Some(self.resolve(id, &mut names).await?),
                None => None,
            };
            entries.push(HistoryViewEntry {
                entry: entry.clone(),
                responsible_name,
            });
        }

        Ok(HistoryView {
            activity_id: query.activity_id,
            entries,
        })
    }

    async fn resolve(
        &self,
        id: &ResourceId,
        cache: &mut HashMap<ResourceId, String>,
    ) -> Result<String, ActivityError> {
        if let Some(name) = cache.get(id) {
            return Ok(name.clone());
        }
        let name = self
            .directory
            .display_name(id)
            .await?
            .unwrap_or_else(|| id.as_str().to_string());
        cache.insert(id.clone(), name.clone());
        Ok(name)
    }
}
