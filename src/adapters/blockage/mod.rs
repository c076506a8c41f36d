//! Site blockage signal adapters.

mod in_memory;

pub use in_memory::InMemorySiteBlockage;
