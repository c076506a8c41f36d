//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers load at the caller's version, run the pure lifecycle
//! engine, commit record and ledger row together, then notify.

pub mod handlers;

pub use handlers::{
    ApplyTransitionCommand, ApplyTransitionHandler, ApplyTransitionResult,
    AuditActivityHandler, AuditActivityQuery, AuditActivityResult,
    EffectiveStatusView, GetActivityHistoryHandler, GetActivityHistoryQuery,
    GetEffectiveStatusHandler, GetEffectiveStatusQuery, HistoryView, HistoryViewEntry,
    SubmitDailyReportCommand, SubmitDailyReportHandler, SubmitDailyReportResult,
};
