//! # lifeline-monitor
//!
//! The check-in monitoring and escalation engine, the suppression record it
//! owns, and the services that enforce the business rules around check-ins,
//! settings, contacts, and user identification.

pub mod engine;
pub mod service;
pub mod suppression;

#[cfg(test)]
pub(crate) mod test_support;

pub use engine::{BatchSummary, EscalationEngine, MonitorStores, UserEvaluation};
pub use suppression::InMemorySuppressionStore;
