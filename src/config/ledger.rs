//! Ledger configuration

use chrono::FixedOffset;
use serde::Deserialize;

use super::error::ValidationError;
use super::features::FeatureFlags;
use crate::domain::activity::TransitionPolicy;

/// Widest real-world UTC offset, in minutes.
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Lifecycle rules and calendar settings
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Offset at which the calendar "today" is evaluated
    #[serde(default)]
    pub utc_offset_minutes: i32,

    /// Largest single extension grant, unbounded when absent
    #[serde(default)]
    pub max_extension_days: Option<u32>,
}

impl LedgerConfig {
    /// Offset used by the system clock
    pub fn utc_offset(&self) -> Result<FixedOffset, ValidationError> {
        let minutes = self.utc_offset_minutes;
        Some(minutes)
            .filter(|m| (-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(m))
            .and_then(|m| m.checked_mul(60))
            .and_then(FixedOffset::east_opt)
            .ok_or(ValidationError::InvalidUtcOffset(minutes))
    }

    /// Guard settings for the transition validator
    pub fn transition_policy(&self, features: &FeatureFlags) -> TransitionPolicy {
        TransitionPolicy {
            require_comment_on_postponed_resume: features.require_comment_on_postponed_resume,
            max_extension_days: self.max_extension_days,
        }
    }

    /// Validate ledger configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.utc_offset()?;
        if self.max_extension_days == Some(0) {
            return Err(ValidationError::InvalidMaxExtensionDays);
        }
        Ok(())
    }
}
