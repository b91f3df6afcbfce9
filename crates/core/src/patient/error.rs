use thiserror::Error;

/// Errors that can occur when validating patient requests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatientError {
    #[error("Patient first name cannot be empty")]
    EmptyFirstName,
}
