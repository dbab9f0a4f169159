use serde::{Deserialize, Serialize};

/// Primary key of a stored user (milliseconds since the Unix epoch at creation).
pub type UserId = i64;

/// A stored user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    /// Stored exactly as supplied by the caller.
    pub password: String,
}

impl User {
    /// Builds the record that will be written for a newly assigned id.
    pub fn from_new(id: UserId, new_user: NewUser) -> Self {
        Self {
            id,
            username: new_user.username,
            email: new_user.email,
            password: new_user.password,
        }
    }

    /// Returns the password-free projection of this user.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// Fields required to create a user. The id is assigned by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Projection returned by the email index: everything except the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub email: String,
}
