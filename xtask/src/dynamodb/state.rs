//! Live state of the users table, read with `DescribeTable`.

use aws_sdk_dynamodb::types::{IndexStatus, TableDescription, TableStatus};
use aws_sdk_dynamodb::Client;

use super::error::{DynamodbError, Result};

/// What exists of the table right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub active: bool,
    pub indexes: Vec<IndexState>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexState {
    pub name: String,
    pub active: bool,
}

impl TableState {
    /// A missing status is read as active: DynamoDB Local omits it for
    /// settled indexes.
    pub fn from_description(table: &TableDescription) -> Self {
        let indexes = table
            .global_secondary_indexes()
            .iter()
            .map(|index| IndexState {
                name: index.index_name().unwrap_or_default().to_string(),
                active: index
                    .index_status()
                    .is_none_or(|status| status == &IndexStatus::Active),
            })
            .collect();

        Self {
            active: table
                .table_status()
                .is_none_or(|status| status == &TableStatus::Active),
            indexes,
        }
    }

    pub fn has_index(&self, name: &str) -> bool {
        self.indexes.iter().any(|index| index.name == name)
    }

    /// Table and every index accept traffic.
    pub fn is_ready(&self) -> bool {
        self.active && self.indexes.iter().all(|index| index.active)
    }
}

/// Reads the table state; `None` when the table does not exist.
pub async fn fetch(client: &Client, table_name: &str) -> Result<Option<TableState>> {
    match client.describe_table().table_name(table_name).send().await {
        Ok(response) => Ok(response.table().map(TableState::from_description)),
        Err(err)
            if err
                .as_service_error()
                .is_some_and(|e| e.is_resource_not_found_exception()) =>
        {
            Ok(None)
        }
        Err(err) => Err(DynamodbError::sdk(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::types::GlobalSecondaryIndexDescription;

    fn index(name: &str, status: Option<IndexStatus>) -> GlobalSecondaryIndexDescription {
        GlobalSecondaryIndexDescription::builder()
            .index_name(name)
            .set_index_status(status)
            .build()
    }

    #[test]
    fn test_active_table_with_active_index_is_ready() {
        let description = TableDescription::builder()
            .table_status(TableStatus::Active)
            .global_secondary_indexes(index("EmailIndex", Some(IndexStatus::Active)))
            .build();

        let state = TableState::from_description(&description);

        assert!(state.has_index("EmailIndex"));
        assert!(state.is_ready());
    }

    #[test]
    fn test_index_still_building_is_not_ready() {
        let description = TableDescription::builder()
            .table_status(TableStatus::Active)
            .global_secondary_indexes(index("EmailIndex", Some(IndexStatus::Creating)))
            .build();

        assert!(!TableState::from_description(&description).is_ready());
    }

    #[test]
    fn test_creating_table_is_not_ready() {
        let description = TableDescription::builder()
            .table_status(TableStatus::Creating)
            .build();

        let state = TableState::from_description(&description);

        assert!(!state.is_ready());
        assert!(!state.has_index("EmailIndex"));
    }

    #[test]
    fn test_missing_statuses_count_as_active() {
        let description = TableDescription::builder()
            .global_secondary_indexes(index("EmailIndex", None))
            .build();

        assert!(TableState::from_description(&description).is_ready());
    }
}
