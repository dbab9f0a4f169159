use thiserror::Error;

/// Errors that can occur during repository operations.
///
/// A missing record is not an error: lookups, updates and deletes return
/// `Ok(None)` for it. `NotFound` is only used inside backends to carry a failed
/// existence condition up to the point where it becomes `None`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::NotFound {
            entity_type: "User",
            id: "1700000000000".to_string(),
        };
        assert_eq!(error.to_string(), "User not found: 1700000000000");
    }

    #[test]
    fn test_repository_error_connection_failed_display() {
        let error = RepositoryError::ConnectionFailed("timeout after 5s".to_string());
        assert_eq!(error.to_string(), "Connection failed: timeout after 5s");
    }

    #[test]
    fn test_repository_error_query_failed_display() {
        let error = RepositoryError::QueryFailed("Table not found".to_string());
        assert_eq!(error.to_string(), "Query failed: Table not found");
    }

    #[test]
    fn test_repository_error_serialization_display() {
        let error = RepositoryError::Serialization("missing attribute: email".to_string());
        assert_eq!(
            error.to_string(),
            "Serialization error: missing attribute: email"
        );
    }

    #[test]
    fn test_repository_error_invalid_data_display() {
        let error = RepositoryError::InvalidData("update set is empty".to_string());
        assert_eq!(error.to_string(), "Invalid data: update set is empty");
    }
}
