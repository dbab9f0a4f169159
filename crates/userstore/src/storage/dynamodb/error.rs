//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `userstore_core::storage`.
//! Every mapped error is logged here, where the fault originates.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use userstore_core::storage::RepositoryError;

/// Transport-level failures that never reached the service.
fn transport_error<E, R>(err: &SdkError<E, R>) -> Option<RepositoryError> {
    match err {
        SdkError::TimeoutError(_) => Some(RepositoryError::ConnectionFailed(
            "DynamoDB request timed out".to_string(),
        )),
        SdkError::DispatchFailure(_) => Some(RepositoryError::ConnectionFailed(
            "Could not reach DynamoDB".to_string(),
        )),
        _ => None,
    }
}

fn logged(operation: &'static str, error: RepositoryError) -> RepositoryError {
    tracing::error!(operation, error = %error, "DynamoDB operation failed");
    error
}

/// Map a Scan SDK error to RepositoryError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ScanError, R>,
) -> RepositoryError {
    if let Some(error) = transport_error(&err) {
        return logged("Scan", error);
    }
    let error = match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table not found".to_string())
        }
        ScanError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::QueryFailed("Throughput exceeded, please retry".to_string())
        }
        ScanError::RequestLimitExceeded(_) => {
            RepositoryError::QueryFailed("Request limit exceeded, please retry".to_string())
        }
        ScanError::InternalServerError(_) => {
            RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("Scan failed: {:?}", err)),
    };
    logged("Scan", error)
}

/// Map a GetItem SDK error to RepositoryError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> RepositoryError {
    if let Some(error) = transport_error(&err) {
        return logged("GetItem", error);
    }
    let error = match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table not found".to_string())
        }
        GetItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::QueryFailed("Throughput exceeded, please retry".to_string())
        }
        GetItemError::RequestLimitExceeded(_) => {
            RepositoryError::QueryFailed("Request limit exceeded, please retry".to_string())
        }
        GetItemError::InternalServerError(_) => {
            RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("GetItem failed: {:?}", err)),
    };
    logged("GetItem", error)
}

/// Map a Query SDK error to RepositoryError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
) -> RepositoryError {
    if let Some(error) = transport_error(&err) {
        return logged("Query", error);
    }
    let error = match err.into_service_error() {
        QueryError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table or index not found".to_string())
        }
        QueryError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::QueryFailed("Throughput exceeded, please retry".to_string())
        }
        QueryError::RequestLimitExceeded(_) => {
            RepositoryError::QueryFailed("Request limit exceeded, please retry".to_string())
        }
        QueryError::InternalServerError(_) => {
            RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("Query failed: {:?}", err)),
    };
    logged("Query", error)
}

/// Map a PutItem SDK error to RepositoryError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
) -> RepositoryError {
    if let Some(error) = transport_error(&err) {
        return logged("PutItem", error);
    }
    let error = match err.into_service_error() {
        PutItemError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table not found".to_string())
        }
        PutItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::QueryFailed("Throughput exceeded, please retry".to_string())
        }
        PutItemError::RequestLimitExceeded(_) => {
            RepositoryError::QueryFailed("Request limit exceeded, please retry".to_string())
        }
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            RepositoryError::QueryFailed("Item collection size limit exceeded".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            RepositoryError::QueryFailed("Transaction conflict, please retry".to_string())
        }
        PutItemError::InternalServerError(_) => {
            RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("PutItem failed: {:?}", err)),
    };
    logged("PutItem", error)
}

/// Map an UpdateItem SDK error to RepositoryError.
///
/// A failed `attribute_exists` condition means the user does not exist and
/// becomes `NotFound`; it is not logged as a fault.
pub fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    if let Some(error) = transport_error(&err) {
        return logged("UpdateItem", error);
    }
    let error = match err.into_service_error() {
        UpdateItemError::ConditionalCheckFailedException(_) => {
            return RepositoryError::NotFound {
                entity_type,
                id: id.into(),
            };
        }
        UpdateItemError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table not found".to_string())
        }
        UpdateItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::QueryFailed("Throughput exceeded, please retry".to_string())
        }
        UpdateItemError::RequestLimitExceeded(_) => {
            RepositoryError::QueryFailed("Request limit exceeded, please retry".to_string())
        }
        UpdateItemError::ItemCollectionSizeLimitExceededException(_) => {
            RepositoryError::QueryFailed("Item collection size limit exceeded".to_string())
        }
        UpdateItemError::TransactionConflictException(_) => {
            RepositoryError::QueryFailed("Transaction conflict, please retry".to_string())
        }
        UpdateItemError::InternalServerError(_) => {
            RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("UpdateItem failed: {:?}", err)),
    };
    logged("UpdateItem", error)
}

/// Map a DeleteItem SDK error to RepositoryError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
) -> RepositoryError {
    if let Some(error) = transport_error(&err) {
        return logged("DeleteItem", error);
    }
    let error = match err.into_service_error() {
        DeleteItemError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table not found".to_string())
        }
        DeleteItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::QueryFailed("Throughput exceeded, please retry".to_string())
        }
        DeleteItemError::RequestLimitExceeded(_) => {
            RepositoryError::QueryFailed("Request limit exceeded, please retry".to_string())
        }
        DeleteItemError::ItemCollectionSizeLimitExceededException(_) => {
            RepositoryError::QueryFailed("Item collection size limit exceeded".to_string())
        }
        DeleteItemError::TransactionConflictException(_) => {
            RepositoryError::QueryFailed("Transaction conflict, please retry".to_string())
        }
        DeleteItemError::InternalServerError(_) => {
            RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("DeleteItem failed: {:?}", err)),
    };
    logged("DeleteItem", error)
}

/// Map an item decoding failure, logging it like a store fault.
pub fn map_decode_error(operation: &'static str, error: RepositoryError) -> RepositoryError {
    logged(operation, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::types::error::{
        ConditionalCheckFailedException, ResourceNotFoundException,
    };

    #[test]
    fn test_failed_condition_becomes_not_found() {
        let err = SdkError::service_error(
            UpdateItemError::ConditionalCheckFailedException(
                ConditionalCheckFailedException::builder().build(),
            ),
            (),
        );

        assert_eq!(
            map_update_item_error(err, "User", "42"),
            RepositoryError::NotFound {
                entity_type: "User",
                id: "42".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_table_on_update_is_query_failure() {
        let err = SdkError::service_error(
            UpdateItemError::ResourceNotFoundException(ResourceNotFoundException::builder().build()),
            (),
        );

        assert_eq!(
            map_update_item_error(err, "User", "42"),
            RepositoryError::QueryFailed("Table not found".to_string())
        );
    }

    #[test]
    fn test_missing_index_on_query_is_query_failure() {
        let err = SdkError::service_error(
            QueryError::ResourceNotFoundException(ResourceNotFoundException::builder().build()),
            (),
        );

        assert_eq!(
            map_query_error(err),
            RepositoryError::QueryFailed("Table or index not found".to_string())
        );
    }

    #[test]
    fn test_timeout_is_connection_failure() {
        let err = SdkError::<UpdateItemError, ()>::timeout_error("operation timed out");

        assert_eq!(
            map_update_item_error(err, "User", "42"),
            RepositoryError::ConnectionFailed("DynamoDB request timed out".to_string())
        );
    }

    #[test]
    fn test_timeout_maps_the_same_for_every_operation() {
        let scan = map_scan_error(SdkError::<ScanError, ()>::timeout_error("slow"));
        let delete = map_delete_item_error(SdkError::<DeleteItemError, ()>::timeout_error("slow"));

        assert!(matches!(scan, RepositoryError::ConnectionFailed(_)));
        assert!(matches!(delete, RepositoryError::ConnectionFailed(_)));
    }

    #[test]
    fn test_request_that_was_never_sent_is_query_failure() {
        let err = SdkError::<GetItemError, ()>::construction_failure("missing key");

        assert!(matches!(
            map_get_item_error(err),
            RepositoryError::QueryFailed(message) if message.starts_with("GetItem failed")
        ));
    }
}
