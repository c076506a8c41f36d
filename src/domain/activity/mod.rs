//! Activity domain module.
//!
//! Tracks the execution state of a scheduled field activity: which
//! status transitions are legal, how completion progress evolves, and
//! the append-only ledger that records both.
//!
//! # Components
//!
//! - `validator` - Transition guards
//! - `progress` - Automatic and manual progress
//! - `engine` - Applies transitions and reports, producing ledger rows
//! - `ledger` - Status events, daily reports, replay
//! - `blockage` - Read-time `Blocked` overlay
//!
//! # Events
//!
//! - `ActivityChanged` - Published after every accepted transition or report

mod aggregate;
pub mod blockage;
pub mod calendar;
mod engine;
mod errors;
mod events;
mod ledger;
mod progress;
mod status;
mod transition;
mod validator;

pub use aggregate::{Activity, ActivityVersion};
pub use blockage::effective_status;
pub use engine::{LifecycleEngine, ReportOutcome, TransitionOutcome};
pub use errors::ActivityError;
pub use events::{ActivityChanged, ChangeCause};
pub use ledger::{ActivityHistory, DailyProgressReport, HistoryEntry, ReplayError, StatusEvent};
pub use progress::{ComputationMode, ProgressCalculator, ProgressInput};
pub use status::{ActivityStatus, DisplayStatus};
pub use transition::{TransitionKind, TransitionParams, TransitionPolicy};
pub use validator::TransitionValidator;
