//! Adapters - Implementations of port interfaces.
//!
//! - `storage` - Activity records and ledgers
//! - `directory` - Resource display names
//! - `blockage` - Site blockage signal
//! - `clock` - System and fixed clocks
//! - `events` - Event bus implementations

pub mod blockage;
pub mod clock;
pub mod directory;
pub mod events;
pub mod storage;

pub use blockage::InMemorySiteBlockage;
pub use clock::{FixedClock, SystemClock};
pub use directory::InMemoryResourceDirectory;
pub use events::InMemoryEventBus;
pub use storage::InMemoryActivityStore;
