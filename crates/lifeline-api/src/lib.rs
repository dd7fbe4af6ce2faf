//! # lifeline-api
//!
//! HTTP API layer for Lifeline built on Axum.
//!
//! Exposes check-in, statistics, settings, and emergency contact endpoints,
//! a manual monitor trigger, and a health check. Every request is attributed
//! to a device user resolved by the [`extractors::DeviceUser`] extractor.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;

#[cfg(test)]
mod tests;
