//! moviedb - data-access layer for a DynamoDB movies table.
//!
//! [`MovieCatalog`] exposes table administration and item operations over any
//! [`moviedb_core::storage::StoreConnection`]. The `dynamodb` feature provides
//! the AWS-backed connection; `inmemory` provides a fake for tests.

pub mod catalog;
pub mod cli;
pub mod output;
pub mod storage;

pub use catalog::MovieCatalog;
