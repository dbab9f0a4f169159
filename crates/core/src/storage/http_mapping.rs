//! Pure functions for mapping repository errors to HTTP status codes.
//!
//! Following the Functional Core pattern, these have no side effects.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `InvalidData` -> 400 (Bad Request)
/// - every backend fault -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use userstore_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::NotFound {
///     entity_type: "User",
///     id: "42".to_string(),
/// };
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::InvalidData(_) => 400,
        RepositoryError::ConnectionFailed(_)
        | RepositoryError::QueryFailed(_)
        | RepositoryError::Serialization(_) => 500,
    }
}

/// Status code for a failed create.
///
/// Store faults on the create path are reported as 400 rather than 500.
pub fn create_error_to_status_code(error: &RepositoryError) -> u16 {
    match repository_error_to_status_code(error) {
        500 => 400,
        code => code,
    }
}
