//! Item reads: point lookup, partition query and table scans.

use moviedb_core::movie::keys::{movie_key, year_between, year_equals};
use moviedb_core::movie::{
    decode_movies, item_to_details, DecodeFault, Decoded, Movie, MovieDetails, MovieKey,
    YearRange,
};
use moviedb_core::storage::{
    GetItemRequest, ItemPage, QueryRequest, RepositoryError, Result, ScanRequest,
    StoreConnection,
};

use super::errors::map_store_error;
use super::MovieCatalog;

impl<S: StoreConnection> MovieCatalog<S> {
    /// Fetches the item at `key`. An absent item is `Ok(None)`.
    pub async fn get_movie(&self, table_name: &str, key: &MovieKey) -> Result<Option<MovieDetails>> {
        let request = GetItemRequest::new(table_name, movie_key(key));

        let item = self
            .store
            .get_item(&request)
            .await
            .map_err(map_store_error)?;

        match item {
            Some(item) => item_to_details(&item)
                .map(Some)
                .map_err(|reason| RepositoryError::Decoding(DecodeFault { index: 0, reason })),
            None => Ok(None),
        }
    }

    /// Returns every movie released in `year`, ordered by title.
    pub async fn query_by_year(&self, table_name: &str, year: i32) -> Result<Decoded<Movie>> {
        let request = QueryRequest::new(table_name, year_equals(year));

        let page = self.store.query(&request).await.map_err(map_store_error)?;

        tracing::debug!(table = %table_name, year, count = page.items.len(), "Queried movies");
        Ok(decode_page(table_name, page))
    }

    /// Returns every movie released between `low` and `high`, inclusive.
    ///
    /// This reads the whole table and filters on the store side, so its cost
    /// grows with the table rather than with the result.
    pub async fn scan_by_year_range(
        &self,
        table_name: &str,
        low: i32,
        high: i32,
    ) -> Result<Decoded<Movie>> {
        let range =
            YearRange::new(low, high).map_err(|e| RepositoryError::Validation(e.to_string()))?;
        let request = ScanRequest::new(table_name).with_filter(year_between(range));

        let page = self.store.scan(&request).await.map_err(map_store_error)?;

        tracing::info!(
            table = %table_name,
            low,
            high,
            scanned = page.scanned_count,
            matched = page.items.len(),
            "Scanned movies by year range"
        );
        Ok(decode_page(table_name, page))
    }

    /// Returns every movie in the table.
    pub async fn list_movies(&self, table_name: &str) -> Result<Decoded<Movie>> {
        let request = ScanRequest::new(table_name);

        let page = self.store.scan(&request).await.map_err(map_store_error)?;

        tracing::debug!(table = %table_name, count = page.items.len(), "Listed movies");
        Ok(decode_page(table_name, page))
    }
}

fn decode_page(table_name: &str, page: ItemPage) -> Decoded<Movie> {
    let mut decoded = decode_movies(&page.items);
    if page.truncated {
        tracing::warn!(
            table = %table_name,
            returned = page.items.len(),
            "Response was truncated; only the first page was read"
        );
        decoded.truncated = true;
    }
    decoded
}
