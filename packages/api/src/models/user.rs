//! # Accounts
//!
//! [`User`] is the full `users` row and never leaves the server. [`UserInfo`] is
//! the client-safe projection returned by the auth server functions; the client
//! turns it into the `store::CurrentUser` its view models run as.

use serde::{Deserialize, Serialize};
use store::CurrentUser;

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Full user record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl User {
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.to_string(),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

impl UserInfo {
    /// Name for headers and greetings, falling back to the email address.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }

    /// The identity notes are created under. Notes record the registered name
    /// only, never the email.
    pub fn to_current_user(&self) -> CurrentUser {
        CurrentUser::new(self.id.clone(), self.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_user_without_name() {
        let info = UserInfo {
            id: "u1".into(),
            email: "alice@example.com".into(),
            name: None,
        };
        assert_eq!(info.display_name(), "alice@example.com");
        assert_eq!(info.to_current_user().owner_display_name(), "Unknown User");
    }
}
