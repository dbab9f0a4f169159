//! DynamoDB repository implementation.
//!
//! Implements `UserRepository` from `userstore_core::storage` using DynamoDB.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;

use userstore_core::storage::{RepositoryError, Result, UserRepository};
use userstore_core::user::{
    select_email_match, NewUser, User, UserIdGenerator, UserId, UserProfile, UserUpdate,
};

use super::conversions::{
    id_value, item_to_profile, item_to_user, user_to_item, ENTITY_TYPE_USER, ID_ATTRIBUTE,
};
use super::error::{
    map_decode_error, map_delete_item_error, map_get_item_error, map_put_item_error,
    map_query_error, map_scan_error, map_update_item_error,
};
use super::expression::{EmailQuery, UpdateExpression};

type Item = HashMap<String, AttributeValue>;

/// DynamoDB-based user repository.
///
/// Holds a shared SDK client; cloning the client is cheap and every request
/// goes through the same connection pool.
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
    email_index: String,
    ids: UserIdGenerator,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client, table and index names.
    pub fn new(
        client: Client,
        table_name: impl Into<String>,
        email_index: impl Into<String>,
    ) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            email_index: email_index.into(),
            ids: UserIdGenerator::new(),
        }
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl UserRepository for DynamoDbRepository {
    async fn list_users(&self) -> Result<Vec<User>> {
        let mut users = Vec::new();
        let mut start_key: Option<Item> = None;

        loop {
            let result = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(map_scan_error)?;

            for item in result.items() {
                users.push(item_to_user(item).map_err(|e| map_decode_error("Scan", e))?);
            }

            match next_page(result.last_evaluated_key) {
                Some(key) => start_key = Some(key),
                None => break,
            }
        }

        tracing::debug!(count = users.len(), "Users listed");
        Ok(users)
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(ID_ATTRIBUTE, id_value(id))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(
                item_to_user(&item).map_err(|e| map_decode_error("GetItem", e))?,
            )),
            None => Ok(None),
        }
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserProfile>> {
        let query = EmailQuery::new(email);
        let mut profiles = Vec::new();
        let mut start_key: Option<Item> = None;

        // Every page is read so the tie-break sees all matches.
        loop {
            let result = self
                .client
                .query()
                .table_name(&self.table_name)
                .index_name(&self.email_index)
                .key_condition_expression(query.key_condition)
                .projection_expression(query.projection)
                .set_expression_attribute_names(Some(query.names.clone()))
                .set_expression_attribute_values(Some(query.values.clone()))
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(map_query_error)?;

            for item in result.items() {
                profiles.push(item_to_profile(item).map_err(|e| map_decode_error("Query", e))?);
            }

            match next_page(result.last_evaluated_key) {
                Some(key) => start_key = Some(key),
                None => break,
            }
        }

        if profiles.len() > 1 {
            tracing::warn!(
                email,
                matches = profiles.len(),
                "Email is shared by several users"
            );
        }

        Ok(select_email_match(profiles))
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let user = User::from_new(self.ids.next_id(), user.clone());

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(user_to_item(&user)))
            .send()
            .await
            .map_err(map_put_item_error)?;

        tracing::debug!(user_id = user.id, "User created");
        Ok(user)
    }

    async fn update_user(&self, id: UserId, update: &UserUpdate) -> Result<Option<User>> {
        let Some(expr) = UpdateExpression::from_update(update) else {
            return Err(RepositoryError::InvalidData(
                "update must set at least one field".to_string(),
            ));
        };

        let mut names = expr.names;
        names.insert("#id".to_string(), ID_ATTRIBUTE.to_string());

        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(ID_ATTRIBUTE, id_value(id))
            .update_expression(expr.expression)
            .condition_expression("attribute_exists(#id)")
            .set_expression_attribute_names(Some(names))
            .set_expression_attribute_values(Some(expr.values))
            .return_values(ReturnValue::AllNew)
            .send()
            .await;

        let outcome = match result {
            Ok(output) => Ok(output.attributes),
            Err(err) => Err(map_update_item_error(err, ENTITY_TYPE_USER, id.to_string())),
        };

        let updated = updated_user(outcome)?;
        if updated.is_some() {
            tracing::debug!(user_id = id, "User updated");
        }
        Ok(updated)
    }

    async fn delete_user(&self, id: UserId) -> Result<Option<User>> {
        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key(ID_ATTRIBUTE, id_value(id))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(map_delete_item_error)?;

        let deleted = deleted_user(result.attributes)?;

        if deleted.is_some() {
            tracing::debug!(user_id = id, "User deleted");
        }
        Ok(deleted)
    }
}

/// Start key for the next page; DynamoDB may return an empty map on the last one.
fn next_page(last_evaluated_key: Option<Item>) -> Option<Item> {
    last_evaluated_key.filter(|key| !key.is_empty())
}

/// Outcome of a conditional `UpdateItem`. A failed existence check is absence.
fn updated_user(outcome: Result<Option<Item>>) -> Result<Option<User>> {
    match outcome {
        Ok(attributes) => attributes
            .map(|item| item_to_user(&item))
            .transpose()
            .map_err(|e| map_decode_error("UpdateItem", e)),
        Err(RepositoryError::NotFound { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Old image returned by `DeleteItem`. Nothing, or an empty map, means the id
/// was not stored.
fn deleted_user(attributes: Option<Item>) -> Result<Option<User>> {
    attributes
        .filter(|item| !item.is_empty())
        .map(|item| item_to_user(&item))
        .transpose()
        .map_err(|e| map_decode_error("DeleteItem", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> User {
        User {
            id: 42,
            username: "ann".to_string(),
            email: "ann@example.com".to_string(),
            password: "hunter2".to_string(),
        }
    }

    #[test]
    fn test_next_page_stops_on_missing_or_empty_key() {
        assert_eq!(next_page(None), None);
        assert_eq!(next_page(Some(Item::new())), None);

        let key = Item::from([("id".to_string(), AttributeValue::N("42".to_string()))]);
        assert_eq!(next_page(Some(key.clone())), Some(key));
    }

    #[test]
    fn test_failed_condition_is_absence() {
        let outcome = Err(RepositoryError::NotFound {
            entity_type: ENTITY_TYPE_USER,
            id: "42".to_string(),
        });

        assert_eq!(updated_user(outcome), Ok(None));
    }

    #[test]
    fn test_update_returns_new_image() {
        let outcome = Ok(Some(user_to_item(&stored())));

        assert_eq!(updated_user(outcome), Ok(Some(stored())));
    }

    #[test]
    fn test_update_fault_is_kept() {
        let outcome = Err(RepositoryError::QueryFailed("Table not found".to_string()));

        assert!(matches!(
            updated_user(outcome),
            Err(RepositoryError::QueryFailed(_))
        ));
    }

    #[test]
    fn test_delete_without_old_image_is_absence() {
        assert_eq!(deleted_user(None), Ok(None));
        assert_eq!(deleted_user(Some(Item::new())), Ok(None));
    }

    #[test]
    fn test_delete_returns_old_image() {
        assert_eq!(deleted_user(Some(user_to_item(&stored()))), Ok(Some(stored())));
    }

    #[test]
    fn test_delete_malformed_old_image_is_serialization_error() {
        let mut item = user_to_item(&stored());
        item.remove("username");

        assert!(matches!(
            deleted_user(Some(item)),
            Err(RepositoryError::Serialization(_))
        ));
    }
}
