//! Per-user notification settings.

pub mod model;
pub mod patch;

pub use model::UserSettings;
pub use patch::SettingsPatch;
