//! # lifeline-core
//!
//! Core crate for Lifeline. Contains configuration schemas, typed
//! identifiers, the local calendar and clock abstractions, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other Lifeline crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
