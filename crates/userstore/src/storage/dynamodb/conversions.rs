//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and domain types.
//! These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use userstore_core::storage::RepositoryError;
use userstore_core::user::{User, UserField, UserId, UserProfile};

pub const ENTITY_TYPE_USER: &str = "User";

/// Partition key attribute of the users table.
pub const ID_ATTRIBUTE: &str = "id";

/// Key value for a user id. Ids are stored as numbers.
pub fn id_value(id: UserId) -> AttributeValue {
    AttributeValue::N(id.to_string())
}

/// Convert a User to DynamoDB item.
pub fn user_to_item(user: &User) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    item.insert(ID_ATTRIBUTE.to_string(), id_value(user.id));
    item.insert(
        UserField::Username.attribute_name().to_string(),
        AttributeValue::S(user.username.clone()),
    );
    item.insert(
        UserField::Email.attribute_name().to_string(),
        AttributeValue::S(user.email.clone()),
    );
    item.insert(
        UserField::Password.attribute_name().to_string(),
        AttributeValue::S(user.password.clone()),
    );

    item
}

/// Convert a DynamoDB item to User.
pub fn item_to_user(item: &HashMap<String, AttributeValue>) -> Result<User, RepositoryError> {
    Ok(User {
        id: get_number(item, ID_ATTRIBUTE)?,
        username: get_string(item, UserField::Username.attribute_name())?,
        email: get_string(item, UserField::Email.attribute_name())?,
        password: get_string(item, UserField::Password.attribute_name())?,
    })
}

/// Convert an email index item to UserProfile.
///
/// Index items never carry the password.
pub fn item_to_profile(
    item: &HashMap<String, AttributeValue>,
) -> Result<UserProfile, RepositoryError> {
    Ok(UserProfile {
        id: get_number(item, ID_ATTRIBUTE)?,
        username: get_string(item, UserField::Username.attribute_name())?,
        email: get_string(item, UserField::Email.attribute_name())?,
    })
}

// ============================================================================
// Helper functions
// ============================================================================

/// Extract a string attribute from a DynamoDB item.
pub fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| RepositoryError::Serialization(format!("Missing or invalid field: {key}")))
}

/// Extract a numeric attribute from a DynamoDB item.
pub fn get_number(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<i64, RepositoryError> {
    let raw = item
        .get(key)
        .and_then(|v| v.as_n().ok())
        .ok_or_else(|| RepositoryError::Serialization(format!("Missing or invalid field: {key}")))?;

    raw.parse()
        .map_err(|e| RepositoryError::Serialization(format!("Invalid number in {key}: {e}")))
}
