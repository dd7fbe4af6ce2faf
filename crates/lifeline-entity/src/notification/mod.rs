//! Notification bookkeeping types.

pub mod channel;
pub mod suppression;

pub use channel::NotificationChannel;
pub use suppression::{SuppressionEntry, SuppressionKey};
