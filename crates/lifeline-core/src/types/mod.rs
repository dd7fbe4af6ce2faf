//! Core type definitions used across the Lifeline workspace.

pub mod calendar;
pub mod clock;
pub mod id;

pub use calendar::{CalendarZone, LocalCalendar};
pub use clock::{Clock, FixedClock, SystemClock};
pub use id::*;
