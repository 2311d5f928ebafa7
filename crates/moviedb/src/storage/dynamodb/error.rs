//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StoreError` from `moviedb_core::storage`. Only the
//! faults callers can act on get their own variant; everything else becomes
//! `Transport`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::delete_table::DeleteTableError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::list_tables::ListTablesError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use moviedb_core::storage::StoreError;

const THROUGHPUT_EXCEEDED: &str = "Throughput exceeded, please retry";
const REQUEST_LIMIT_EXCEEDED: &str = "Request limit exceeded, please retry";
const INTERNAL_SERVER_ERROR: &str = "DynamoDB internal server error";
const RESOURCE_NOT_FOUND: &str = "Requested resource not found";

/// Classify an operation error that has no dedicated variant.
///
/// Validation failures arrive as unmodelled errors carrying the
/// `ValidationException` code.
fn classify<E>(err: E, operation: &str) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    match err.code() {
        Some("ValidationException") => StoreError::Validation(
            err.message()
                .unwrap_or("One or more parameter values were invalid")
                .to_string(),
        ),
        _ => StoreError::Transport(format!("{operation} failed: {}", DisplayErrorContext(&err))),
    }
}

fn resource_not_found(message: Option<&str>) -> StoreError {
    StoreError::ResourceNotFound(message.unwrap_or(RESOURCE_NOT_FOUND).to_string())
}

fn transport(message: &str) -> StoreError {
    StoreError::Transport(message.to_string())
}

/// Map a ListTables SDK error to StoreError.
pub fn map_list_tables_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ListTablesError, R>,
) -> StoreError {
    match err.into_service_error() {
        ListTablesError::InternalServerError(_) => transport(INTERNAL_SERVER_ERROR),
        err => classify(err, "ListTables"),
    }
}

/// Map a CreateTable SDK error to StoreError.
pub fn map_create_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<CreateTableError, R>,
) -> StoreError {
    match err.into_service_error() {
        CreateTableError::ResourceInUseException(e) => StoreError::ResourceInUse(
            e.message().unwrap_or("Table already exists").to_string(),
        ),
        CreateTableError::LimitExceededException(_) => transport(REQUEST_LIMIT_EXCEEDED),
        CreateTableError::InternalServerError(_) => transport(INTERNAL_SERVER_ERROR),
        err => classify(err, "CreateTable"),
    }
}

/// Map a DeleteTable SDK error to StoreError.
pub fn map_delete_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteTableError, R>,
) -> StoreError {
    match err.into_service_error() {
        DeleteTableError::ResourceNotFoundException(e) => resource_not_found(e.message()),
        DeleteTableError::ResourceInUseException(e) => StoreError::ResourceInUse(
            e.message().unwrap_or("Table is being modified").to_string(),
        ),
        DeleteTableError::LimitExceededException(_) => transport(REQUEST_LIMIT_EXCEEDED),
        DeleteTableError::InternalServerError(_) => transport(INTERNAL_SERVER_ERROR),
        err => classify(err, "DeleteTable"),
    }
}

/// Map a DescribeTable SDK error to StoreError.
pub fn map_describe_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DescribeTableError, R>,
) -> StoreError {
    match err.into_service_error() {
        DescribeTableError::ResourceNotFoundException(e) => resource_not_found(e.message()),
        DescribeTableError::InternalServerError(_) => transport(INTERNAL_SERVER_ERROR),
        err => classify(err, "DescribeTable"),
    }
}

/// Map a PutItem SDK error to StoreError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
) -> StoreError {
    match err.into_service_error() {
        PutItemError::ConditionalCheckFailedException(_) => StoreError::ConditionalCheckFailed,
        PutItemError::ResourceNotFoundException(e) => resource_not_found(e.message()),
        PutItemError::ProvisionedThroughputExceededException(_) => transport(THROUGHPUT_EXCEEDED),
        PutItemError::RequestLimitExceeded(_) => transport(REQUEST_LIMIT_EXCEEDED),
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            transport("Item collection size limit exceeded")
        }
        PutItemError::TransactionConflictException(_) => {
            transport("Transaction conflict, please retry")
        }
        PutItemError::InternalServerError(_) => transport(INTERNAL_SERVER_ERROR),
        err => classify(err, "PutItem"),
    }
}

/// Map an UpdateItem SDK error to StoreError.
pub fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
) -> StoreError {
    match err.into_service_error() {
        UpdateItemError::ConditionalCheckFailedException(_) => StoreError::ConditionalCheckFailed,
        UpdateItemError::ResourceNotFoundException(e) => resource_not_found(e.message()),
        UpdateItemError::ProvisionedThroughputExceededException(_) => {
            transport(THROUGHPUT_EXCEEDED)
        }
        UpdateItemError::RequestLimitExceeded(_) => transport(REQUEST_LIMIT_EXCEEDED),
        UpdateItemError::ItemCollectionSizeLimitExceededException(_) => {
            transport("Item collection size limit exceeded")
        }
        UpdateItemError::TransactionConflictException(_) => {
            transport("Transaction conflict, please retry")
        }
        UpdateItemError::InternalServerError(_) => transport(INTERNAL_SERVER_ERROR),
        err => classify(err, "UpdateItem"),
    }
}

/// Map a GetItem SDK error to StoreError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> StoreError {
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(e) => resource_not_found(e.message()),
        GetItemError::ProvisionedThroughputExceededException(_) => transport(THROUGHPUT_EXCEEDED),
        GetItemError::RequestLimitExceeded(_) => transport(REQUEST_LIMIT_EXCEEDED),
        GetItemError::InternalServerError(_) => transport(INTERNAL_SERVER_ERROR),
        err => classify(err, "GetItem"),
    }
}

/// Map a DeleteItem SDK error to StoreError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
) -> StoreError {
    match err.into_service_error() {
        DeleteItemError::ConditionalCheckFailedException(_) => StoreError::ConditionalCheckFailed,
        DeleteItemError::ResourceNotFoundException(e) => resource_not_found(e.message()),
        DeleteItemError::ProvisionedThroughputExceededException(_) => {
            transport(THROUGHPUT_EXCEEDED)
        }
        DeleteItemError::RequestLimitExceeded(_) => transport(REQUEST_LIMIT_EXCEEDED),
        DeleteItemError::TransactionConflictException(_) => {
            transport("Transaction conflict, please retry")
        }
        DeleteItemError::InternalServerError(_) => transport(INTERNAL_SERVER_ERROR),
        err => classify(err, "DeleteItem"),
    }
}

/// Map a Query SDK error to StoreError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
) -> StoreError {
    match err.into_service_error() {
        QueryError::ResourceNotFoundException(e) => resource_not_found(e.message()),
        QueryError::ProvisionedThroughputExceededException(_) => transport(THROUGHPUT_EXCEEDED),
        QueryError::RequestLimitExceeded(_) => transport(REQUEST_LIMIT_EXCEEDED),
        QueryError::InternalServerError(_) => transport(INTERNAL_SERVER_ERROR),
        err => classify(err, "Query"),
    }
}

/// Map a Scan SDK error to StoreError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ScanError, R>,
) -> StoreError {
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(e) => resource_not_found(e.message()),
        ScanError::ProvisionedThroughputExceededException(_) => transport(THROUGHPUT_EXCEEDED),
        ScanError::RequestLimitExceeded(_) => transport(REQUEST_LIMIT_EXCEEDED),
        ScanError::InternalServerError(_) => transport(INTERNAL_SERVER_ERROR),
        err => classify(err, "Scan"),
    }
}
