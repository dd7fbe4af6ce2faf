//! Scheduled evaluation for Lifeline.
//!
//! The scheduler runs a full user batch on a periodic cron, at fixed local
//! times each day, and once shortly after startup.

pub mod scheduler;

pub use scheduler::MonitorScheduler;
