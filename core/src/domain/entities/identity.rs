//! Identity entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account, keyed by its unique email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable row identifier, unchanged when the email changes
    pub id: Uuid,

    /// Unique email address, the subject of every credential
    pub email: String,

    /// Display name
    pub name: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Timestamp when the account was registered
    pub registered_at: DateTime<Utc>,
}

impl Identity {
    /// Creates a new identity registered now
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            password_hash,
            registered_at: Utc::now(),
        }
    }

    /// Updates the display name
    pub fn rename(&mut self, name: String) {
        self.name = name;
    }

    /// Updates the email address
    pub fn change_email(&mut self, email: String) {
        self.email = email;
    }

    /// Replaces the stored password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
    }
}
