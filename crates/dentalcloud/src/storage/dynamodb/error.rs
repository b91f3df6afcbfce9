//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `dentalcloud_core::storage`.
//! Throttling, timeouts and internal errors become `Unavailable` so the
//! store's retry policy can pick them up.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use dentalcloud_core::storage::RepositoryError;

/// Map a GetItem SDK error to RepositoryError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> RepositoryError {
    if let Some(error) = transport_error(&err) {
        return error;
    }

    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table not found".to_string())
        }
        GetItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::Unavailable("Throughput exceeded".to_string())
        }
        GetItemError::RequestLimitExceeded(_) => {
            RepositoryError::Unavailable("Request limit exceeded".to_string())
        }
        GetItemError::InternalServerError(_) => {
            RepositoryError::Unavailable("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("GetItem failed: {:?}", err)),
    }
}

/// Map a Query SDK error to RepositoryError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
) -> RepositoryError {
    if let Some(error) = transport_error(&err) {
        return error;
    }

    match err.into_service_error() {
        QueryError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table or index not found".to_string())
        }
        QueryError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::Unavailable("Throughput exceeded".to_string())
        }
        QueryError::RequestLimitExceeded(_) => {
            RepositoryError::Unavailable("Request limit exceeded".to_string())
        }
        QueryError::InternalServerError(_) => {
            RepositoryError::Unavailable("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("Query failed: {:?}", err)),
    }
}

/// Map a PutItem SDK error to RepositoryError.
///
/// A failed `attribute_not_exists` condition means the key is taken.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    if let Some(error) = transport_error(&err) {
        return error;
    }

    match err.into_service_error() {
        PutItemError::ConditionalCheckFailedException(_) => RepositoryError::AlreadyExists {
            entity_type,
            id: id.into(),
        },
        PutItemError::ResourceNotFoundException(_) => {
            RepositoryError::WriteFailed("Table not found".to_string())
        }
        PutItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::Unavailable("Throughput exceeded".to_string())
        }
        PutItemError::RequestLimitExceeded(_) => {
            RepositoryError::Unavailable("Request limit exceeded".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            RepositoryError::Unavailable("Transaction conflict".to_string())
        }
        PutItemError::InternalServerError(_) => {
            RepositoryError::Unavailable("DynamoDB internal server error".to_string())
        }
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            RepositoryError::WriteFailed("Item collection size limit exceeded".to_string())
        }
        err => RepositoryError::WriteFailed(format!("PutItem failed: {:?}", err)),
    }
}

/// Failures that happened before DynamoDB produced a response.
fn transport_error<E, R>(err: &SdkError<E, R>) -> Option<RepositoryError> {
    match err {
        SdkError::TimeoutError(_) => Some(RepositoryError::Unavailable(
            "Request to DynamoDB timed out".to_string(),
        )),
        SdkError::DispatchFailure(_) => Some(RepositoryError::Unavailable(
            "Request to DynamoDB could not be dispatched".to_string(),
        )),
        _ => None,
    }
}
