//! Item writes: conditional insert, attribute updates, delete, batch load.

use moviedb_core::movie::keys::{key_absent, key_present, movie_key};
use moviedb_core::movie::{info_to_update, movie_to_item, Movie, MovieInfo, MovieKey};
use moviedb_core::storage::{
    BatchInsertError, DeleteItemRequest, PutItemRequest, RepositoryError, Result,
    StoreConnection, UpdateItemRequest,
};

use super::errors::{map_guarded_write_error, map_insert_error, map_store_error};
use super::{MovieCatalog, ENTITY_MOVIE};

impl<S: StoreConnection> MovieCatalog<S> {
    /// Inserts a movie unless an item with the same key already exists.
    ///
    /// Uniqueness is enforced by the store's conditional write, so when two
    /// callers race on the same key exactly one of them succeeds.
    pub async fn put_movie(&self, table_name: &str, movie: &Movie) -> Result<()> {
        let request =
            PutItemRequest::new(table_name, movie_to_item(movie)).with_condition(key_absent());

        self.store
            .put_item(&request)
            .await
            .map_err(|e| map_insert_error(e, ENTITY_MOVIE, movie.key().to_string()))?;

        tracing::debug!(table = %table_name, key = %movie.key(), "Inserted movie");
        Ok(())
    }

    /// Sets every attribute present in `patch` on the item at `key`.
    ///
    /// Attributes absent from the patch are left untouched and the key is
    /// never modified. Applying the same patch twice is the same as once.
    /// When no item exists at `key` the store creates one holding the key
    /// and the patched attributes; use [`MovieCatalog::update_existing_movie`]
    /// to refuse that instead.
    pub async fn update_movie(
        &self,
        table_name: &str,
        key: &MovieKey,
        patch: &MovieInfo,
    ) -> Result<()> {
        let request = update_request(table_name, key, patch)?;

        self.store
            .update_item(&request)
            .await
            .map_err(map_store_error)?;

        tracing::debug!(table = %table_name, key = %key, "Updated movie");
        Ok(())
    }

    /// Like [`MovieCatalog::update_movie`], but fails with `NotFound` when
    /// there is no item at `key`.
    pub async fn update_existing_movie(
        &self,
        table_name: &str,
        key: &MovieKey,
        patch: &MovieInfo,
    ) -> Result<()> {
        let request = update_request(table_name, key, patch)?.with_condition(key_present());

        self.store
            .update_item(&request)
            .await
            .map_err(|e| map_guarded_write_error(e, ENTITY_MOVIE, key.to_string()))?;

        tracing::debug!(table = %table_name, key = %key, "Updated existing movie");
        Ok(())
    }

    /// Deletes the item at `key`. `NotFound` when there is none.
    pub async fn delete_movie(&self, table_name: &str, key: &MovieKey) -> Result<()> {
        let request =
            DeleteItemRequest::new(table_name, movie_key(key)).with_condition(key_present());

        self.store
            .delete_item(&request)
            .await
            .map_err(|e| map_guarded_write_error(e, ENTITY_MOVIE, key.to_string()))?;

        tracing::debug!(table = %table_name, key = %key, "Deleted movie");
        Ok(())
    }

    /// Inserts each record in source order with [`MovieCatalog::put_movie`].
    ///
    /// Not atomic. Loading stops at the first failure; the error reports how
    /// many records were committed before it. Returns the number of records
    /// inserted.
    pub async fn batch_insert<I>(
        &self,
        table_name: &str,
        records: I,
    ) -> std::result::Result<usize, BatchInsertError>
    where
        I: IntoIterator<Item = Movie>,
    {
        let mut committed = 0;
        for movie in records {
            if let Err(source) = self.put_movie(table_name, &movie).await {
                tracing::warn!(
                    table = %table_name,
                    key = %movie.key(),
                    committed,
                    error = %source,
                    "Batch insert stopped"
                );
                return Err(BatchInsertError { committed, source });
            }
            committed += 1;
        }

        tracing::info!(table = %table_name, count = committed, "Batch insert complete");
        Ok(committed)
    }
}

fn update_request(
    table_name: &str,
    key: &MovieKey,
    patch: &MovieInfo,
) -> Result<UpdateItemRequest> {
    if patch.is_empty() {
        return Err(RepositoryError::Validation(format!(
            "Update for {key} sets no attributes"
        )));
    }
    Ok(UpdateItemRequest::new(
        table_name,
        movie_key(key),
        info_to_update(patch),
    ))
}
