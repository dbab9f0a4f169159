//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of `UserRepository`
//! using `aws-sdk-dynamodb`.

mod client;
mod conversions;
mod error;
mod expression;
mod repository;

pub use client::{create_client, target_display};
pub use conversions::{user_to_item, ID_ATTRIBUTE};
pub use repository::DynamoDbRepository;
