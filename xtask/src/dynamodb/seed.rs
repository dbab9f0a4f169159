//! Seed command implementation.

use super::error::{DynamodbError, Result};
use aws_sdk_dynamodb::types::{PutRequest, WriteRequest};
use aws_sdk_dynamodb::Client;
use userstore::storage::dynamodb::user_to_item;
use userstore_core::user::{NewUser, User, UserIdGenerator};

/// Maximum items per BatchWriteItem call.
const BATCH_SIZE: usize = 25;

/// Attempts per batch while DynamoDB keeps returning unprocessed items.
const MAX_BATCH_ATTEMPTS: usize = 5;

/// Generate demo users with unique usernames and emails.
///
/// Ids come from the same generator the server uses, so seeded users sort
/// like real ones.
pub fn generate_seed_users(count: u32) -> Vec<User> {
    let first_names = [
        "ann", "bob", "carla", "dmitri", "elif", "femi", "greta", "hiro", "ines", "jonas",
    ];
    let domains = ["example.com", "example.org", "example.net"];
    let ids = UserIdGenerator::new();

    (0..count as usize)
        .map(|i| {
            let name = first_names[i % first_names.len()];
            let round = i / first_names.len();
            let username = if round == 0 {
                name.to_string()
            } else {
                format!("{name}{round}")
            };
            let email = format!("{username}@{}", domains[i % domains.len()]);
            let password = format!("demo-{username}");

            User::from_new(ids.next_id(), NewUser::new(username, email, password))
        })
        .collect()
}

/// One put request per user, in the item layout the server reads.
fn write_requests(users: &[User]) -> Result<Vec<WriteRequest>> {
    users
        .iter()
        .map(|user| {
            let put = PutRequest::builder()
                .set_item(Some(user_to_item(user)))
                .build()?;
            Ok(WriteRequest::builder().put_request(put).build())
        })
        .collect()
}

/// Insert users into DynamoDB, resending unprocessed items.
pub async fn seed_users(client: &Client, table_name: &str, users: &[User]) -> Result<u32> {
    let mut inserted = 0;

    for chunk in users.chunks(BATCH_SIZE) {
        let mut pending = write_requests(chunk)?;

        let mut attempts = 0;
        while !pending.is_empty() {
            if attempts == MAX_BATCH_ATTEMPTS {
                return Err(DynamodbError::Unprocessed {
                    remaining: pending.len(),
                    attempts,
                });
            }
            attempts += 1;

            let response = client
                .batch_write_item()
                .request_items(table_name, pending)
                .send()
                .await
                .map_err(DynamodbError::sdk)?;

            pending = response
                .unprocessed_items
                .and_then(|mut items| items.remove(table_name))
                .unwrap_or_default();
        }

        inserted += chunk.len() as u32;
    }

    Ok(inserted)
}
