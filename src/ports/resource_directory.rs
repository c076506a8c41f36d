//! Resource directory port.
//!
//! Resolves resource identifiers to display names. The ledger itself
//! only stores the identifier.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ResourceId};

#[async_trait]
pub trait ResourceDirectory: Send + Sync {
    /// Display name for `id`, or `None` if the directory does not know it.
    async fn display_name(&self, id: &ResourceId) -> Result<Option<String>, DomainError>;
}
