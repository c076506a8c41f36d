//! In-memory site blockage signal.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::domain::foundation::{DomainError, SiteId};
use crate::ports::SiteBlockageSignal;

/// Set of currently blocked sites.
#[derive(Debug, Clone, Default)]
pub struct InMemorySiteBlockage {
    blocked: Arc<RwLock<HashSet<SiteId>>>,
}

impl InMemorySiteBlockage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the general blockage on a site.
    pub async fn block(&self, site_id: SiteId) {
        if self.blocked.write().await.insert(site_id) {
            info!(site_id = %site_id, "Site blocked");
        }
    }

    /// Lifts the general blockage on a site.
    pub async fn unblock(&self, site_id: &SiteId) {
        if self.blocked.write().await.remove(site_id) {
            info!(site_id = %site_id, "Site unblocked");
        }
    }
}

#[async_trait]
impl SiteBlockageSignal for InMemorySiteBlockage {
    async fn is_blocked(&self, site_id: &SiteId) -> Result<bool, DomainError> {
        Ok(self.blocked.read().await.contains(site_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn block_and_unblock() {
        let signal = InMemorySiteBlockage::new();
        let site = SiteId::new();
        assert!(!signal.is_blocked(&site).await.unwrap());

        signal.block(site).await;
        assert!(signal.is_blocked(&site).await.unwrap());
        assert!(!signal.is_blocked(&SiteId::new()).await.unwrap());

        signal.unblock(&site).await;
        assert!(!signal.is_blocked(&site).await.unwrap());
    }
}
