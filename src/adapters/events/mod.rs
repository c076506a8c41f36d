//! Event bus adapters.
//!
//! - `InMemoryEventBus` - In-process recorder of published envelopes

mod in_memory;

pub use in_memory::InMemoryEventBus;
