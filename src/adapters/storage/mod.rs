//! Storage adapters for activities and their ledgers.

mod in_memory_activity_store;

pub use in_memory_activity_store::InMemoryActivityStore;
