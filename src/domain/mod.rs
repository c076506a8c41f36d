//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, events)
//! - `activity` - Field activity lifecycle, progress and history ledger

pub mod activity;
pub mod foundation;
