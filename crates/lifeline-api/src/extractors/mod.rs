//! Custom Axum extractors.

pub mod device;

pub use device::DeviceUser;
