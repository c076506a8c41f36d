//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `ActivityRepository` - Versioned activity records
//! - `HistoryStore` - Append-only transition and report ledger
//!
//! ## Collaborator Ports
//!
//! - `ResourceDirectory` - Resource id to display name
//! - `SiteBlockageSignal` - Site-level blockage flag, read at query time
//! - `Clock` - Injectable "today" and "now"
//! - `EventPublisher` - Change notifications for dependent views

mod activity_repository;
mod clock;
mod event_publisher;
mod history_store;
mod resource_directory;
mod site_blockage;

pub use activity_repository::{ActivityRepository, StoreError};
pub use clock::Clock;
pub use event_publisher::EventPublisher;
pub use history_store::HistoryStore;
pub use resource_directory::ResourceDirectory;
pub use site_blockage::SiteBlockageSignal;
