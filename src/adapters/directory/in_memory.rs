//! In-memory resource directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ResourceId};
use crate::ports::ResourceDirectory;

/// Resource directory backed by a map of id to display name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResourceDirectory {
    names: Arc<RwLock<HashMap<ResourceId, String>>>,
}

impl InMemoryResourceDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directory pre-filled with `entries`.
    pub fn with_entries(entries: impl IntoIterator<Item = (ResourceId, String)>) -> Self {
        Self {
            names: Arc::new(RwLock::new(entries.into_iter().collect())),
        }
    }

    /// Adds or renames a resource.
    pub async fn register(&self, id: ResourceId, name: impl Into<String>) {
        self.names.write().await.insert(id, name.into());
    }
}

#[async_trait]
impl ResourceDirectory for InMemoryResourceDirectory {
    async fn display_name(&self, id: &ResourceId) -> Result<Option<String>, DomainError> {
        Ok(self.names.read().await.get(id).cloned())
    }
}
