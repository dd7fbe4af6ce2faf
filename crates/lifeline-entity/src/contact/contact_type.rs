//! Emergency contact phone type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of phone line a contact is reached on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "contact_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContactType {
    /// Mobile phone.
    Mobile,
    /// Landline.
    Home,
}

impl ContactType {
    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Home => "home",
        }
    }
}

impl fmt::Display for ContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContactType {
    type Err = lifeline_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mobile" => Ok(Self::Mobile),
            "home" => Ok(Self::Home),
            _ => Err(lifeline_core::AppError::validation(format!(
                "Invalid contact type: '{s}'. Expected one of: mobile, home"
            ))),
        }
    }
}
