//! Emergency contact entities.

pub mod contact_type;
pub mod model;

pub use contact_type::ContactType;
pub use model::{ContactPatch, EmergencyContact, NewContact};
