//! Site blockage signal port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SiteId};

/// Read-only signal telling whether a site is under a general blockage.
///
/// Polled on every read; results must not be cached by callers.
#[async_trait]
pub trait SiteBlockageSignal: Send + Sync {
    async fn is_blocked(&self, site_id: &SiteId) -> Result<bool, DomainError>;
}
