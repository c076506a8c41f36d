//! Command infrastructure for application handlers.
//!
//! `CommandMetadata` carries the acting resource plus correlation and
//! tracing context through a command and onto the events it emits.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ResourceId;

/// Metadata context for command handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The resource executing this command.
    pub actor: ResourceId,

    /// Links related operations across a single request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Distributed tracing span/trace ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata with the acting resource.
    pub fn new(actor: ResourceId) -> Self {
        Self {
            actor,
            correlation_id: None,
            trace_id: None,
        }
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Builder: Add trace ID for distributed tracing.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Returns the trace ID if set.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Creates a test fixture with a test actor.
    pub fn test_fixture() -> Self {
        Self::new(ResourceId::new("test-crew-123").unwrap())
            .with_correlation_id("test-correlation-id")
    }
}
