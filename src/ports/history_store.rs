//! History store port - append-only ledger persistence.

use async_trait::async_trait;

use super::StoreError;
use crate::domain::activity::{ActivityHistory, HistoryEntry};
use crate::domain::foundation::ActivityId;

/// Port for the append-only history ledger.
///
/// Implementations never update or remove entries.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append one entry.
    async fn append(&self, entry: HistoryEntry) -> Result<(), StoreError>;

    /// All entries for an activity, ordered by timestamp.
    async fn list_for_activity(&self, id: &ActivityId) -> Result<ActivityHistory, StoreError>;
}
