//! # lifeline-entity
//!
//! Domain entity models for Lifeline. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod checkin;
pub mod contact;
pub mod notification;
pub mod settings;
pub mod user;
