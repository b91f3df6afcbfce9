use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use dentalcloud_core::patient::PatientError;
use dentalcloud_core::storage::{repository_error_to_status_code, RepositoryError};

/// Problems with the shape of an HTTP request, caught before the store runs.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("api expects application/json content-type")]
    UnsupportedMediaType,
    #[error("request body is invalid: {0}")]
    InvalidBody(String),
    #[error("search query parameter is required")]
    MissingSearchTerm,
}

impl RequestError {
    fn status_code(&self) -> StatusCode {
        match self {
            RequestError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            RequestError::InvalidBody(_) | RequestError::MissingSearchTerm => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            let code = repository_error_to_status_code(repo_error);
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        } else if self.0.downcast_ref::<PatientError>().is_some() {
            StatusCode::BAD_REQUEST
        } else if let Some(request_error) = self.0.downcast_ref::<RequestError>() {
            request_error.status_code()
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        // Backend details stay in the logs.
        let message = if status_code.is_server_error() {
            tracing::error!(status = %status_code, error = %self.0, "Request failed");
            match self.0.downcast_ref::<RepositoryError>() {
                Some(RepositoryError::IndexIncomplete { patient_id, .. }) => {
                    format!("Patient {patient_id} stored but search index incomplete")
                }
                _ => status_code
                    .canonical_reason()
                    .unwrap_or("Internal Server Error")
                    .to_string(),
            }
        } else {
            tracing::warn!(status = %status_code, error = %self.0, "Request rejected");
            self.0.to_string()
        };

        (status_code, message).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
