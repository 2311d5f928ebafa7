//! DynamoDB store connection.
//!
//! Implements `StoreConnection` from `moviedb_core::storage` using
//! `aws-sdk-dynamodb`.

mod client;
mod conversions;
mod error;
mod store;

pub use client::{create_client, wait_for_table_active, wait_for_table_deleted, AwsConfig};
pub use store::DynamoDbStore;
