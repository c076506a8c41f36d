//! Progress calculator.
//!
//! Automatic progress is the share of the planned window that has
//! elapsed, rounded to a whole percent. Manual progress is accepted
//! verbatim when it lies in `[0, 100]` and rejected otherwise; it is
//! never clamped.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{calendar, ActivityError};
use crate::domain::foundation::Percentage;

/// How a daily progress value was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputationMode {
    Auto,
    Manual,
}

impl fmt::Display for ComputationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComputationMode::Auto => write!(f, "auto"),
            ComputationMode::Manual => write!(f, "manual"),
        }
    }
}

/// Caller's choice for a daily report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum ProgressInput {
    /// Derive from the planned window and today's date.
    Auto,
    /// Use the supplied value.
    Manual(Decimal),
}

impl ProgressInput {
    pub fn mode(&self) -> ComputationMode {
        match self {
            ProgressInput::Auto => ComputationMode::Auto,
            ProgressInput::Manual(_) => ComputationMode::Manual,
        }
    }
}

/// Stateless progress computation.
pub struct ProgressCalculator;

impl ProgressCalculator {
    /// Elapsed share of `[start, end]` at `today`, as a whole percent.
    ///
    /// Dates before `start` give 0, dates past `end` give 100.
    pub fn compute_auto(
        start: NaiveDate,
        end: NaiveDate,
        today: NaiveDate,
    ) -> Result<Percentage, ActivityError> {
        let total = calendar::days_between(start, end);
        if total <= 0 {
            return Err(ActivityError::DegeneratePlanningWindow { start, end });
        }
        let elapsed = calendar::elapsed_days(start, today);

        let ratio = Decimal::from(elapsed) * Decimal::ONE_HUNDRED / Decimal::from(total);
        let rounded = ratio.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        Ok(Percentage::clamped(rounded))
    }

    /// Accepts a manually reported value if it lies in `[0, 100]`.
    pub fn accept_manual(value: Decimal) -> Result<Percentage, ActivityError> {
        Percentage::try_new(value).map_err(|_| ActivityError::OutOfRange(value))
    }

    /// Dispatches on the caller's chosen mode.
    pub fn resolve(
        input: ProgressInput,
        start: NaiveDate,
        end: NaiveDate,
        today: NaiveDate,
    ) -> Result<Percentage, ActivityError> {
        match input {
            ProgressInput::Auto => Self::compute_auto(start, end, today),
            ProgressInput::Manual(value) => Self::accept_manual(value),
        }
    }
}
