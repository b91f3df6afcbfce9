//! Pure functions for mapping repository errors to HTTP status codes.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `AlreadyExists` -> 409 (Conflict)
/// - `Unavailable` -> 503 (Service Unavailable)
/// - `InvalidData` -> 400 (Bad Request)
/// - everything else -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use dentalcloud_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::NotFound {
///     entity_type: "Patient",
///     id: "abc-123".to_string(),
/// };
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::Unavailable(_) => 503,
        RepositoryError::WriteFailed(_) => 500,
        RepositoryError::QueryFailed(_) => 500,
        RepositoryError::Decode(_) => 500,
        RepositoryError::InvalidData(_) => 400,
        RepositoryError::IndexIncomplete { .. } => 500,
    }
}
