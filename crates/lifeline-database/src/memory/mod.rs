//! Process-local store implementations.

pub mod store;

pub use store::MemoryStore;
