//! User identity and profile records.

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// Email/password pair sent to the auth endpoints. The client performs
/// only non-empty checks before sending; password strength and email
/// uniqueness are the backend's rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// The authenticated user as reported by `auth/user`. Resolved right
/// after login to obtain the durable user id behind the bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: UserId,
    pub email: Option<String>,
}

/// A row from the backend `profiles` table: the user's display name,
/// created once when the first login completes a registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub name: String,
}

impl Profile {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
