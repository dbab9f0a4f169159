//! Shape of the users table and its email index.
//!
//! Key names come from the server's item layout so the table always matches
//! what the repository reads and writes.

use aws_sdk_dynamodb::types::{
    AttributeDefinition, KeySchemaElement, KeyType, Projection, ProjectionType,
    ScalarAttributeType,
};
use userstore::config::Config;
use userstore::storage::dynamodb::ID_ATTRIBUTE;
use userstore_core::user::UserField;

use super::error::Result;

/// Names of the users table and its email index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsersTable {
    pub table_name: String,
    pub email_index: String,
}

impl UsersTable {
    pub fn from_config(config: &Config) -> Self {
        Self {
            table_name: config.table_name.clone(),
            email_index: config.email_index.clone(),
        }
    }

    /// `id` (N) is the only key of the table.
    pub fn key_schema(&self) -> Result<Vec<KeySchemaElement>> {
        Ok(vec![hash_key(ID_ATTRIBUTE)?])
    }

    /// The email index is keyed on `email` (S).
    pub fn email_index_key_schema(&self) -> Result<Vec<KeySchemaElement>> {
        Ok(vec![hash_key(UserField::Email.attribute_name())?])
    }

    /// Definitions for every key attribute, table and index.
    pub fn attribute_definitions(&self) -> Result<Vec<AttributeDefinition>> {
        Ok(vec![
            definition(ID_ATTRIBUTE, ScalarAttributeType::N)?,
            self.email_attribute_definition()?,
        ])
    }

    pub fn email_attribute_definition(&self) -> Result<AttributeDefinition> {
        definition(UserField::Email.attribute_name(), ScalarAttributeType::S)
    }

    /// Besides the keys only the username is copied into the index; the
    /// password never is.
    pub fn email_index_projection(&self) -> Projection {
        Projection::builder()
            .projection_type(ProjectionType::Include)
            .non_key_attributes(UserField::Username.attribute_name())
            .build()
    }
}

fn hash_key(attribute: &str) -> Result<KeySchemaElement> {
    Ok(KeySchemaElement::builder()
        .attribute_name(attribute)
        .key_type(KeyType::Hash)
        .build()?)
}

fn definition(attribute: &str, kind: ScalarAttributeType) -> Result<AttributeDefinition> {
    Ok(AttributeDefinition::builder()
        .attribute_name(attribute)
        .attribute_type(kind)
        .build()?)
}
