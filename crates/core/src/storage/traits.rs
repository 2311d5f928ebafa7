use async_trait::async_trait;

use crate::attribute::Item;

use super::{
    DeleteItemRequest, GetItemRequest, ItemPage, PutItemRequest, QueryRequest, ScanRequest,
    StoreError, TableSpec, UpdateItemRequest,
};

/// Result type for store connection calls.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A connection to the key-value store.
///
/// Implementations must be safe to share between concurrent operations.
#[async_trait]
pub trait StoreConnection: Send + Sync {
    /// Lists table names (first response page only).
    async fn list_tables(&self) -> StoreResult<Vec<String>>;

    /// Creates a table with the given schema.
    async fn create_table(&self, spec: &TableSpec) -> StoreResult<()>;

    /// Deletes a table and all of its items.
    async fn delete_table(&self, table_name: &str) -> StoreResult<()>;

    /// Writes a whole item.
    async fn put_item(&self, request: &PutItemRequest) -> StoreResult<()>;

    /// Applies attribute actions to one item.
    async fn update_item(&self, request: &UpdateItemRequest) -> StoreResult<()>;

    /// Reads one item by its full key.
    async fn get_item(&self, request: &GetItemRequest) -> StoreResult<Option<Item>>;

    /// Deletes one item by its full key.
    async fn delete_item(&self, request: &DeleteItemRequest) -> StoreResult<()>;

    /// Reads one partition.
    async fn query(&self, request: &QueryRequest) -> StoreResult<ItemPage>;

    /// Reads the whole table.
    async fn scan(&self, request: &ScanRequest) -> StoreResult<ItemPage>;
}
