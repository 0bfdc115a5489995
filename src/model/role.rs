use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Discriminator for the consolidated credential-holder table. Admin and
/// user records share one schema and one set of handlers.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
pub enum AccountRole {
    #[strum(serialize = "admin")]
    #[serde(rename = "admin")]
    Admin,
    #[strum(serialize = "user")]
    #[serde(rename = "user")]
    User,
}

impl AccountRole {
    /// Capitalized form used in response messages.
    pub fn label(&self) -> &'static str {
        match self {
            AccountRole::Admin => "Admin",
            AccountRole::User => "User",
        }
    }
}
