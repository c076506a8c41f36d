//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FeatureFlags {
    /// Require a comment when resuming from Postponed as well as Suspended
    #[serde(default)]
    pub require_comment_on_postponed_resume: bool,

    /// Install the tracing subscriber at startup
    #[serde(default = "default_enable_tracing")]
    pub enable_tracing: bool,
}

fn default_enable_tracing() -> bool {
    true
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            require_comment_on_postponed_resume: false,
            enable_tracing: default_enable_tracing(),
        }
    }
}
