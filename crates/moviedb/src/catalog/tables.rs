//! Table administration.

use moviedb_core::storage::{movies_table_spec, Result, StoreConnection, TableSpec};

use super::errors::{map_create_table_error, map_delete_table_error, map_store_error};
use super::MovieCatalog;

impl<S: StoreConnection> MovieCatalog<S> {
    /// Lists table names. Only the first response page is returned.
    pub async fn list_tables(&self) -> Result<Vec<String>> {
        let tables = self.store.list_tables().await.map_err(map_store_error)?;
        tracing::debug!(count = tables.len(), "Listed tables");
        Ok(tables)
    }

    /// Creates a movies table: numeric `Year` partition key, string `Title`
    /// sort key, default throughput.
    pub async fn create_table(&self, table_name: &str) -> Result<()> {
        self.create_table_with(&movies_table_spec(table_name)).await
    }

    /// Creates a table from an explicit spec.
    pub async fn create_table_with(&self, spec: &TableSpec) -> Result<()> {
        self.store
            .create_table(spec)
            .await
            .map_err(|e| map_create_table_error(e, &spec.table_name))?;

        tracing::info!(
            table = %spec.table_name,
            read_capacity_units = spec.throughput.read_capacity_units,
            write_capacity_units = spec.throughput.write_capacity_units,
            "Created table"
        );
        Ok(())
    }

    /// Deletes a table and everything in it.
    pub async fn delete_table(&self, table_name: &str) -> Result<()> {
        self.store
            .delete_table(table_name)
            .await
            .map_err(|e| map_delete_table_error(e, table_name))?;

        tracing::info!(table = %table_name, "Deleted table");
        Ok(())
    }
}
