//! Carries out a [`Plan`] against DynamoDB.

use std::time::Duration;

use aws_sdk_dynamodb::types::{
    BillingMode, CreateGlobalSecondaryIndexAction, GlobalSecondaryIndex,
    GlobalSecondaryIndexUpdate,
};
use aws_sdk_dynamodb::Client;

use super::error::{DynamodbError, Result};
use super::plan::Plan;
use super::schema::UsersTable;
use super::state;

const POLL_INTERVAL: Duration = Duration::from_secs(2);
const MAX_POLLS: u32 = 60;

pub async fn apply(client: &Client, plan: &Plan) -> Result<()> {
    match plan {
        Plan::CreateTable(table) => {
            create_table(client, table).await?;
            wait_until_ready(client, &table.table_name).await
        }
        Plan::AddEmailIndex(table) => {
            add_email_index(client, table).await?;
            wait_until_ready(client, &table.table_name).await
        }
        Plan::DeleteTable(table) => {
            client
                .delete_table()
                .table_name(&table.table_name)
                .send()
                .await
                .map_err(DynamodbError::sdk)?;
            Ok(())
        }
        Plan::UpToDate(_) | Plan::AlreadyGone(_) => Ok(()),
    }
}

async fn create_table(client: &Client, table: &UsersTable) -> Result<()> {
    let email_index = GlobalSecondaryIndex::builder()
        .index_name(&table.email_index)
        .set_key_schema(Some(table.email_index_key_schema()?))
        .projection(table.email_index_projection())
        .build()?;

    client
        .create_table()
        .table_name(&table.table_name)
        .set_key_schema(Some(table.key_schema()?))
        .set_attribute_definitions(Some(table.attribute_definitions()?))
        .global_secondary_indexes(email_index)
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await
        .map_err(DynamodbError::sdk)?;

    Ok(())
}

async fn add_email_index(client: &Client, table: &UsersTable) -> Result<()> {
    let create = CreateGlobalSecondaryIndexAction::builder()
        .index_name(&table.email_index)
        .set_key_schema(Some(table.email_index_key_schema()?))
        .projection(table.email_index_projection())
        .build()?;

    client
        .update_table()
        .table_name(&table.table_name)
        .attribute_definitions(table.email_attribute_definition()?)
        .global_secondary_index_updates(GlobalSecondaryIndexUpdate::builder().create(create).build())
        .send()
        .await
        .map_err(DynamodbError::sdk)?;

    Ok(())
}

/// Polls until the table and all of its indexes are active.
async fn wait_until_ready(client: &Client, table_name: &str) -> Result<()> {
    for _ in 0..MAX_POLLS {
        if state::fetch(client, table_name)
            .await?
            .is_some_and(|state| state.is_ready())
        {
            return Ok(());
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }

    Err(DynamodbError::TableActivationTimeout {
        table_name: table_name.to_string(),
    })
}
