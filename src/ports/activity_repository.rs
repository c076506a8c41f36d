//! Activity repository port.
//!
//! Persists activity records under optimistic concurrency: every write
//! names the version the caller last read, and the store refuses the
//! write if the persisted version has moved on.
//!
//! # Example
//!
//! ```ignore
//! let outcome = engine.apply_transition(&activity, kind, params, today, now)?;
//! repo.commit(&outcome.activity, activity.version(), outcome.entry()).await?;
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::activity::{Activity, ActivityError, ActivityVersion, HistoryEntry};
use crate::domain::foundation::ActivityId;

/// Errors raised by activity and history stores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Activity not found: {0}")]
    NotFound(ActivityId),

    #[error("Activity already exists: {0}")]
    AlreadyExists(ActivityId),

    #[error("Concurrent modification: expected {expected}, found {actual}")]
    ConcurrentModification {
        expected: ActivityVersion,
        actual: ActivityVersion,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for ActivityError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ActivityError::not_found(id),
            StoreError::ConcurrentModification { expected, actual } => {
                ActivityError::concurrent_modification(expected, actual)
            }
            StoreError::AlreadyExists(_) | StoreError::Storage(_) => {
                ActivityError::infrastructure(err.to_string())
            }
        }
    }
}

/// Port for activity persistence.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Find an activity by ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &ActivityId) -> Result<Option<Activity>, StoreError>;

    /// Store a newly scheduled activity.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if the id is taken
    async fn insert(&self, activity: &Activity) -> Result<(), StoreError>;

    /// Replace the stored activity if its version still equals `expected`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the activity does not exist
    /// - `ConcurrentModification` if the stored version differs
    async fn save(&self, activity: &Activity, expected: ActivityVersion) -> Result<(), StoreError>;

    /// Save the activity and append its ledger entry as one unit.
    ///
    /// Either both land or neither does.
    ///
    /// # Errors
    ///
    /// Same as [`ActivityRepository::save`].
    async fn commit(
        &self,
        activity: &Activity,
        expected: ActivityVersion,
        entry: HistoryEntry,
    ) -> Result<(), StoreError>;
}
