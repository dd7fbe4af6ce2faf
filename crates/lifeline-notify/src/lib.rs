//! # lifeline-notify
//!
//! Outbound notification delivery. The escalation engine talks to the
//! [`EmailSender`] and [`SmsSender`] traits; this crate provides HTTP
//! providers (a JSON mail API and Twilio) plus log-only providers for
//! development.

pub mod email;
pub mod phone;
pub mod sender;
pub mod sms;

pub use email::build_email_sender;
pub use sender::{EmailSender, SmsSender};
pub use sms::build_sms_sender;
