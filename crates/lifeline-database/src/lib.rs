//! # lifeline-database
//!
//! Store traits consumed by the escalation engine and the services, with two
//! families of implementations: PostgreSQL repositories built on sqlx, and
//! process-local stores used in development mode and in tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod traits;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use traits::{CheckInStore, ContactStore, SettingsStore, SuppressionStore, UserStore};
