//! Storage backend implementations.
//!
//! Concrete implementations of `userstore_core::storage::UserRepository`.
//! The backend is selected at startup with `--storage` / `STORAGE_BACKEND`.

pub mod dynamodb;
pub mod inmemory;

pub use dynamodb::DynamoDbRepository;
pub use inmemory::InMemoryRepository;
