//! Application state with repository-based storage.
//!
//! Shared by all request handlers. The storage backend is chosen at startup
//! and held as a trait object.

use std::sync::Arc;

use userstore_core::storage::UserRepository;

use crate::config::Config;
use crate::storage::{dynamodb, DynamoDbRepository, InMemoryRepository};

/// Storage backend selectable at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StorageBackend {
    /// AWS DynamoDB (or DynamoDB Local via `AWS_ENDPOINT_URL`).
    #[default]
    Dynamodb,
    /// Process-local HashMap; data is lost on exit.
    Memory,
}

/// Shared application state.
///
/// Cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// User repository.
    pub user_repo: Arc<dyn UserRepository>,
}

impl AppState {
    /// Creates a state around an existing repository.
    pub fn with_repository(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Creates the state for the selected backend.
    pub async fn new(backend: StorageBackend, config: &Config) -> anyhow::Result<Self> {
        let user_repo: Arc<dyn UserRepository> = match backend {
            StorageBackend::Dynamodb => {
                let client = dynamodb::create_client(config).await;
                let repo =
                    DynamoDbRepository::new(client, &config.table_name, &config.email_index);
                tracing::info!(
                    target_env = %dynamodb::target_display(config),
                    table = repo.table_name(),
                    index = %config.email_index,
                    timeout_ms = config.operation_timeout_ms,
                    "Using DynamoDB storage"
                );
                Arc::new(repo)
            }
            StorageBackend::Memory => {
                tracing::info!("Using in-memory storage");
                Arc::new(InMemoryRepository::new())
            }
        };

        Ok(Self::with_repository(user_repo))
    }
}

impl Default for AppState {
    /// In-memory state, used by tests.
    fn default() -> Self {
        Self::with_repository(Arc::new(InMemoryRepository::new()))
    }
}
