mod error;
mod table;
mod traits;
mod types;

pub use error::{BatchInsertError, RepositoryError, Result, StoreError};
pub use table::{
    format_table_spec, movies_table_spec, KeyAttribute, ScalarType, TableSpec, Throughput,
};
pub use traits::{StoreConnection, StoreResult};
pub use types::{
    DeleteItemRequest, GetItemRequest, ItemPage, PutItemRequest, QueryRequest, ScanRequest,
    UpdateItemRequest,
};
