//! Business services used by the HTTP layer.

pub mod checkin;
pub mod contact;
pub mod settings;
pub mod user;

pub use checkin::CheckInService;
pub use contact::ContactService;
pub use settings::SettingsService;
pub use user::UserService;
