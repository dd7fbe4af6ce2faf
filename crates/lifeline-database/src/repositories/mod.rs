//! PostgreSQL repository implementations of the store traits.

pub mod checkin;
pub mod contact;
pub mod settings;
pub mod suppression;
pub mod user;

pub use checkin::CheckInRepository;
pub use contact::ContactRepository;
pub use settings::SettingsRepository;
pub use suppression::SuppressionRepository;
pub use user::UserRepository;
