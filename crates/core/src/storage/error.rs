use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    /// The backend could not serve the request right now (throttling,
    /// timeouts, dispatch failures, internal errors). Safe to retry.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
    #[error("Write failed: {0}")]
    WriteFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    /// A stored item does not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    /// The patient record was written but at least one of its search-index
    /// entries was not. The patient can be fetched by id but may be missing
    /// from search results until it is reindexed.
    #[error("Patient {patient_id} stored but search index incomplete: {reason}")]
    IndexIncomplete { patient_id: Uuid, reason: String },
}

impl RepositoryError {
    /// Returns true if retrying the same call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, RepositoryError::Unavailable(_))
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::NotFound {
            entity_type: "Patient",
            id: "abc-123".to_string(),
        };
        assert_eq!(error.to_string(), "Patient not found: abc-123");
    }

    #[test]
    fn test_repository_error_already_exists_display() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "Patient",
            id: "abc-123".to_string(),
        };
        assert_eq!(error.to_string(), "Patient already exists: abc-123");
    }

    #[test]
    fn test_repository_error_unavailable_display() {
        let error = RepositoryError::Unavailable("throughput exceeded".to_string());
        assert_eq!(error.to_string(), "Backend unavailable: throughput exceeded");
    }

    #[test]
    fn test_repository_error_decode_display() {
        let error = RepositoryError::Decode("missing field: fn".to_string());
        assert_eq!(error.to_string(), "Decode error: missing field: fn");
    }

    #[test]
    fn test_repository_error_index_incomplete_display() {
        let error = RepositoryError::IndexIncomplete {
            patient_id: Uuid::nil(),
            reason: "Write failed: boom".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Patient 00000000-0000-0000-0000-000000000000 stored but search index incomplete: Write failed: boom"
        );
    }

    #[test]
    fn test_only_unavailable_is_transient() {
        assert!(RepositoryError::Unavailable("timeout".to_string()).is_transient());

        assert!(!RepositoryError::WriteFailed("denied".to_string()).is_transient());
        assert!(!RepositoryError::QueryFailed("bad index".to_string()).is_transient());
        assert!(!RepositoryError::Decode("shape".to_string()).is_transient());
        assert!(!RepositoryError::NotFound {
            entity_type: "Patient",
            id: "x".to_string()
        }
        .is_transient());
    }
}
