use acct_core::domain::entities::{Identity, IssuedToken};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(max = 255))]
    pub name: String,

    #[validate(length(max = 255))]
    pub email: String,

    /// bcrypt only reads the first 72 bytes of a password
    #[validate(length(max = 72))]
    pub password: String,

    #[validate(length(max = 72))]
    pub confirm_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(max = 255))]
    pub email: String,

    #[validate(length(max = 72))]
    pub password: String,
}

/// Both fields are optional; absent or blank values leave the profile as is
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub name: Option<String>,

    #[serde(default)]
    #[validate(length(max = 255))]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(max = 72))]
    pub old_password: String,

    #[validate(length(max = 72))]
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl LoginResponse {
    /// `None` only if the expiry claim is out of range, which `issue` never produces
    pub fn from_issued(issued: IssuedToken) -> Option<Self> {
        let expires_at = issued.expires_at()?;
        Some(Self {
            token: issued.token,
            expires_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub name: String,
    pub email: String,
    pub registered_at: DateTime<Utc>,
}

impl From<Identity> for ProfileResponse {
    fn from(identity: Identity) -> Self {
        Self {
            name: identity.name,
            email: identity.email,
            registered_at: identity.registered_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileResponse {
    pub message: String,
    pub profile: ProfileResponse,

    /// New credential, present only when the email changed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<LoginResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
