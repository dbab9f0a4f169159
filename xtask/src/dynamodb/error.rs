//! Errors raised by the table tasks.

use aws_sdk_dynamodb::error::{BuildError, DisplayErrorContext};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DynamodbError>;

#[derive(Error, Debug)]
pub enum DynamodbError {
    #[error("DynamoDB request failed: {0}")]
    Sdk(String),

    #[error("Invalid DynamoDB request: {0}")]
    Build(#[from] BuildError),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Table '{table_name}' not found, run `cargo xtask dynamodb deploy` first")]
    TableNotFound { table_name: String },

    #[error("{remaining} items still unprocessed after {attempts} batch writes")]
    Unprocessed { remaining: usize, attempts: usize },

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("Table '{table_name}' did not become active in time")]
    TableActivationTimeout { table_name: String },
}

impl DynamodbError {
    /// Wraps an SDK failure with its whole source chain in the message.
    pub fn sdk<E: std::error::Error + 'static>(err: E) -> Self {
        Self::Sdk(DisplayErrorContext(err).to_string())
    }
}
