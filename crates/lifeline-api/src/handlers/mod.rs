//! HTTP request handlers organized by domain.

pub mod checkin;
pub mod contact;
pub mod health;
pub mod monitor;
pub mod settings;
