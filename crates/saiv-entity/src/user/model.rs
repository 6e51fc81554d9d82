//! User entity model.

use serde::{Deserialize, Serialize};

use super::role::UserRole;

/// A backend user account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    #[serde(default)]
    pub id: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Full name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Role.
    #[serde(default)]
    pub role: UserRole,
}

impl User {
    /// Name for display, falling back to `"User"`.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or("User")
    }
}
