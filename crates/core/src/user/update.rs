//! Strongly-typed field update set for users.
//!
//! Only the mutable attributes named by [`UserField`] can ever be written by an
//! update, so arbitrary attribute names never reach the store.

use serde::{Deserialize, Serialize};

use super::types::User;

/// A mutable attribute of a stored user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    Username,
    Email,
    Password,
}

impl UserField {
    /// All mutable fields, in the order they appear in generated expressions.
    pub const ALL: [UserField; 3] = [UserField::Username, UserField::Email, UserField::Password];

    /// The attribute name used in the store.
    pub fn attribute_name(self) -> &'static str {
        match self {
            UserField::Username => "username",
            UserField::Email => "email",
            UserField::Password => "password",
        }
    }
}

/// Set of field values to write. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserUpdate {
    /// Create an empty update set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Returns the value supplied for a field, if any.
    pub fn get(&self, field: UserField) -> Option<&str> {
        match field {
            UserField::Username => self.username.as_deref(),
            UserField::Email => self.email.as_deref(),
            UserField::Password => self.password.as_deref(),
        }
    }

    /// Present fields paired with their values, in [`UserField::ALL`] order.
    pub fn fields(&self) -> Vec<(UserField, &str)> {
        UserField::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|value| (field, value)))
            .collect()
    }

    /// Returns true when no field is present.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.password.is_none()
    }

    /// Apply present fields to an existing user. The id is never touched.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(username) = &self.username {
            user.username = username.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(password) = &self.password {
            user.password = password.clone();
        }
    }
}

impl From<&User> for UserUpdate {
    /// A fully populated update set carrying every mutable field of `user`.
    fn from(user: &User) -> Self {
        Self {
            username: Some(user.username.clone()),
            email: Some(user.email.clone()),
            password: Some(user.password.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::NewUser;

    #[test]
    fn test_fields_preserve_declaration_order() {
        let update = UserUpdate::new().with_password("p").with_username("u");

        assert_eq!(
            update.fields(),
            vec![(UserField::Username, "u"), (UserField::Password, "p")]
        );
    }

    #[test]
    fn test_empty_update() {
        assert!(UserUpdate::new().is_empty());
        assert!(!UserUpdate::new().with_email("e").is_empty());
        assert!(UserUpdate::new().fields().is_empty());
    }

    #[test]
    fn test_apply_to_leaves_omitted_fields() {
        let mut user = User::from_new(1, NewUser::new("a", "b", "c"));
        UserUpdate::new().with_email("new@x.com").apply_to(&mut user);

        assert_eq!(user.id, 1);
        assert_eq!(user.username, "a");
        assert_eq!(user.email, "new@x.com");
        assert_eq!(user.password, "c");
    }

    #[test]
    fn test_from_user_is_fully_populated() {
        let user = User::from_new(1, NewUser::new("a", "b", "c"));
        let update = UserUpdate::from(&user);

        assert_eq!(update.fields().len(), 3);
    }

    #[test]
    fn test_deserialize_rejects_unknown_attribute() {
        let result: Result<UserUpdate, _> = serde_json::from_str(r#"{"isAdmin":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_partial_body() {
        let update: UserUpdate = serde_json::from_str(r#"{"username":"x"}"#).unwrap();
        assert_eq!(update, UserUpdate::new().with_username("x"));
    }

    #[test]
    fn test_attribute_names() {
        let names: Vec<_> = UserField::ALL.iter().map(|f| f.attribute_name()).collect();
        assert_eq!(names, vec!["username", "email", "password"]);
    }
}
