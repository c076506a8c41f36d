//! Activity Ledger - Field Activity Lifecycle & Progress Ledger
//!
//! This crate tracks the execution state of scheduled field activities:
//! which status transitions are legal, how completion progress evolves
//! over the planned window, and the append-only history of both.
//! Writes are guarded by optimistic concurrency on the activity version.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
