//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod activity;

pub use activity::{
    // Commands
    ApplyTransitionCommand, ApplyTransitionHandler, ApplyTransitionResult,
    SubmitDailyReportCommand, SubmitDailyReportHandler, SubmitDailyReportResult,
    // Queries
    AuditActivityHandler, AuditActivityQuery, AuditActivityResult,
    EffectiveStatusView, GetEffectiveStatusHandler, GetEffectiveStatusQuery,
    GetActivityHistoryHandler, GetActivityHistoryQuery, HistoryView, HistoryViewEntry,
};
