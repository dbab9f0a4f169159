//! In-memory storage backend.
//!
//! Stores users in a HashMap wrapped in `Arc<RwLock<_>>`. Used for local
//! development without DynamoDB and as the test double for handler tests.

mod repository;

pub use repository::InMemoryRepository;
