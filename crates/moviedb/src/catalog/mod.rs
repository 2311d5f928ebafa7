//! Movie catalog: every table and item operation against one store connection.
//!
//! The catalog holds no state besides the connection. Each call names its
//! target table, builds its request from pure helpers in `moviedb_core`, and
//! maps store faults to `RepositoryError` according to what the request meant.

mod errors;
mod reads;
mod tables;
mod writes;

use moviedb_core::storage::StoreConnection;

const ENTITY_MOVIE: &str = "Movie";

/// Data-access facade over an injected store connection.
#[derive(Debug, Clone)]
pub struct MovieCatalog<S> {
    store: S,
}

impl<S: StoreConnection> MovieCatalog<S> {
    /// Creates a catalog over an already configured connection.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying connection.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(all(test, feature = "inmemory"))]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;
    use moviedb_core::attribute::{number, string, AttributeValue, CodecError, Item};
    use moviedb_core::movie::{DecodeFault, Movie, MovieInfo, MovieKey};
    use moviedb_core::storage::{RepositoryError, StoreError};

    const TABLE: &str = "movies";

    async fn catalog() -> MovieCatalog<InMemoryStore> {
        let catalog = MovieCatalog::new(InMemoryStore::new());
        catalog.create_table(TABLE).await.unwrap();
        catalog
    }

    fn matrix() -> Movie {
        Movie::new(1999, "The Matrix")
    }

    // ------------------------------------------------------------------------
    // Tables
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_create_table_twice_is_already_exists() {
        let catalog = catalog().await;

        let result = catalog.create_table(TABLE).await;

        assert_eq!(
            result,
            Err(RepositoryError::AlreadyExists {
                entity_type: "Table",
                id: TABLE.to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_delete_missing_table_is_not_found() {
        let catalog = MovieCatalog::new(InMemoryStore::new());

        let result = catalog.delete_table("t1").await;

        assert_eq!(
            result,
            Err(RepositoryError::NotFound {
                entity_type: "Table",
                id: "t1".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_list_tables_transport_failure() {
        let catalog = catalog().await;
        catalog
            .store()
            .inject_fault(StoreError::Transport("unreachable".to_string()))
            .await;

        let result = catalog.list_tables().await;

        assert_eq!(result, Err(RepositoryError::Transport("unreachable".to_string())));
    }

    // ------------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_put_then_get_round_trip() {
        let catalog = catalog().await;

        catalog.put_movie(TABLE, &matrix()).await.unwrap();
        let details = catalog
            .get_movie(TABLE, &matrix().key())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(details.movie, matrix());
        assert_eq!(details.info, MovieInfo::default());
    }

    #[tokio::test]
    async fn test_duplicate_put_is_already_exists_and_keeps_first() {
        let catalog = catalog().await;
        catalog.put_movie(TABLE, &matrix()).await.unwrap();
        catalog
            .update_movie(TABLE, &matrix().key(), &MovieInfo::new().with_rank(1))
            .await
            .unwrap();

        let result = catalog.put_movie(TABLE, &matrix()).await;

        assert_eq!(
            result,
            Err(RepositoryError::AlreadyExists {
                entity_type: "Movie",
                id: "1999/The Matrix".to_string()
            })
        );
        let details = catalog
            .get_movie(TABLE, &matrix().key())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(details.info.rank, Some(1));
    }

    #[tokio::test]
    async fn test_concurrent_puts_exactly_one_wins() {
        let catalog = catalog().await;
        let (first, second) = (matrix(), matrix());

        let (a, b) = tokio::join!(
            catalog.put_movie(TABLE, &first),
            catalog.put_movie(TABLE, &second)
        );

        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        let listed = catalog.list_movies(TABLE).await.unwrap();
        assert_eq!(listed.records, vec![matrix()]);
    }

    #[tokio::test]
    async fn test_put_transport_failure_is_reraised() {
        let catalog = catalog().await;
        catalog
            .store()
            .inject_fault(StoreError::Transport("connection reset".to_string()))
            .await;

        let result = catalog.put_movie(TABLE, &matrix()).await;

        assert!(matches!(result, Err(RepositoryError::Transport(_))));
        assert!(catalog
            .get_movie(TABLE, &matrix().key())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_sets_only_patched_attributes() {
        let catalog = catalog().await;
        catalog.put_movie(TABLE, &matrix()).await.unwrap();

        catalog
            .update_movie(
                TABLE,
                &matrix().key(),
                &MovieInfo::new().with_plot("Neo wakes up.").with_rank(1),
            )
            .await
            .unwrap();
        catalog
            .update_movie(TABLE, &matrix().key(), &MovieInfo::new().with_rank(2))
            .await
            .unwrap();

        let details = catalog
            .get_movie(TABLE, &matrix().key())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(details.movie, matrix());
        assert_eq!(details.info.plot.as_deref(), Some("Neo wakes up."));
        assert_eq!(details.info.rank, Some(2));
    }

    #[tokio::test]
    async fn test_update_is_idempotent() {
        let catalog = catalog().await;
        catalog.put_movie(TABLE, &matrix()).await.unwrap();
        let patch = MovieInfo::new().with_plot("Neo wakes up.").with_rank(1);

        catalog
            .update_movie(TABLE, &matrix().key(), &patch)
            .await
            .unwrap();
        let once = catalog.get_movie(TABLE, &matrix().key()).await.unwrap();
        catalog
            .update_movie(TABLE, &matrix().key(), &patch)
            .await
            .unwrap();
        let twice = catalog.get_movie(TABLE, &matrix().key()).await.unwrap();

        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn test_update_absent_key_creates_item() {
        let catalog = catalog().await;
        let key = MovieKey::new(2003, "Oldboy");

        catalog
            .update_movie(TABLE, &key, &MovieInfo::new().with_rank(7))
            .await
            .unwrap();

        let details = catalog.get_movie(TABLE, &key).await.unwrap().unwrap();
        assert_eq!(details.movie, Movie::new(2003, "Oldboy"));
        assert_eq!(details.info.rank, Some(7));
    }

    #[tokio::test]
    async fn test_update_existing_absent_key_is_not_found() {
        let catalog = catalog().await;
        let key = MovieKey::new(2003, "Oldboy");

        let result = catalog
            .update_existing_movie(TABLE, &key, &MovieInfo::new().with_rank(7))
            .await;

        assert_eq!(
            result,
            Err(RepositoryError::NotFound {
                entity_type: "Movie",
                id: "2003/Oldboy".to_string()
            })
        );
        assert!(catalog.get_movie(TABLE, &key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_existing_present_key() {
        let catalog = catalog().await;
        catalog.put_movie(TABLE, &matrix()).await.unwrap();

        catalog
            .update_existing_movie(TABLE, &matrix().key(), &MovieInfo::new().with_plot("x"))
            .await
            .unwrap();

        let details = catalog
            .get_movie(TABLE, &matrix().key())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(details.info.plot.as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn test_empty_patch_is_validation_error() {
        let catalog = catalog().await;

        let result = catalog
            .update_movie(TABLE, &matrix().key(), &MovieInfo::new())
            .await;

        assert!(matches!(result, Err(RepositoryError::Validation(_))));
        assert!(catalog
            .get_movie(TABLE, &matrix().key())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_movie() {
        let catalog = catalog().await;
        catalog.put_movie(TABLE, &matrix()).await.unwrap();

        catalog.delete_movie(TABLE, &matrix().key()).await.unwrap();

        assert!(catalog
            .get_movie(TABLE, &matrix().key())
            .await
            .unwrap()
            .is_none());
        assert!(matches!(
            catalog.delete_movie(TABLE, &matrix().key()).await,
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_batch_insert_in_order() {
        let catalog = catalog().await;
        let records = vec![
            Movie::new(2013, "Rush"),
            Movie::new(2013, "Prisoners"),
            Movie::new(2010, "Inception"),
        ];

        let count = catalog.batch_insert(TABLE, records).await.unwrap();

        assert_eq!(count, 3);
        assert_eq!(catalog.list_movies(TABLE).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_batch_insert_stops_at_first_failure() {
        let catalog = catalog().await;
        let records = vec![
            Movie::new(2013, "Rush"),
            Movie::new(2013, "Prisoners"),
            Movie::new(2013, "Rush"),
            Movie::new(2010, "Inception"),
        ];

        let err = catalog.batch_insert(TABLE, records).await.unwrap_err();

        assert_eq!(err.committed, 2);
        assert!(matches!(err.source, RepositoryError::AlreadyExists { .. }));
        let listed = catalog.list_movies(TABLE).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(!listed.records.contains(&Movie::new(2010, "Inception")));
    }

    #[tokio::test]
    async fn test_batch_insert_empty_source() {
        let catalog = catalog().await;
        assert_eq!(catalog.batch_insert(TABLE, Vec::new()).await.unwrap(), 0);
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_get_absent_is_none() {
        let catalog = catalog().await;
        assert!(catalog
            .get_movie(TABLE, &MovieKey::new(1900, "Nothing"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_get_drops_malformed_optional_attributes() {
        let catalog = catalog().await;
        let mut item = Item::new();
        item.insert("Year".to_string(), number(1999));
        item.insert("Title".to_string(), string("The Matrix"));
        item.insert("Plot".to_string(), number(5));
        item.insert("Rank".to_string(), string("first"));
        catalog.store().insert_raw(TABLE, item).await.unwrap();

        let details = catalog
            .get_movie(TABLE, &matrix().key())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(details.movie, matrix());
        assert_eq!(details.info, MovieInfo::default());
    }

    #[tokio::test]
    async fn test_get_with_fractional_year_is_decoding_error() {
        let catalog = catalog().await;
        let mut item = Item::new();
        item.insert("Year".to_string(), AttributeValue::N("1999.0".to_string()));
        item.insert("Title".to_string(), string("The Matrix"));
        catalog.store().insert_raw(TABLE, item).await.unwrap();

        let result = catalog.get_movie(TABLE, &matrix().key()).await;

        assert_eq!(
            result,
            Err(RepositoryError::Decoding(DecodeFault {
                index: 0,
                reason: CodecError::Malformed {
                    field: "Year".to_string(),
                    value: "1999.0".to_string()
                }
            }))
        );
    }

    #[tokio::test]
    async fn test_query_by_year_sorted_and_matches_listing() {
        let catalog = catalog().await;
        let records = vec![
            Movie::new(2013, "Rush"),
            Movie::new(2012, "Argo"),
            Movie::new(2013, "Gravity"),
            Movie::new(2013, "Prisoners"),
        ];
        catalog.batch_insert(TABLE, records).await.unwrap();

        let queried = catalog.query_by_year(TABLE, 2013).await.unwrap();

        let titles: Vec<_> = queried.records.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Gravity", "Prisoners", "Rush"]);

        let mut listed: Vec<_> = catalog
            .list_movies(TABLE)
            .await
            .unwrap()
            .records
            .into_iter()
            .filter(|m| m.year == 2013)
            .collect();
        listed.sort_by(|a, b| a.title.cmp(&b.title));
        assert_eq!(queried.records, listed);
    }

    #[tokio::test]
    async fn test_query_empty_partition() {
        let catalog = catalog().await;
        let queried = catalog.query_by_year(TABLE, 1900).await.unwrap();
        assert!(queried.is_empty());
        assert!(!queried.truncated);
    }

    #[tokio::test]
    async fn test_scan_by_year_range_is_inclusive() {
        let catalog = catalog().await;
        let records = [1999, 2000, 2005, 2010, 2011]
            .into_iter()
            .map(|year| Movie::new(year, format!("Movie {year}")));
        catalog.batch_insert(TABLE, records).await.unwrap();

        let scanned = catalog.scan_by_year_range(TABLE, 2000, 2010).await.unwrap();

        let mut years: Vec<_> = scanned.records.iter().map(|m| m.year).collect();
        years.sort();
        assert_eq!(years, vec![2000, 2005, 2010]);
    }

    #[tokio::test]
    async fn test_scan_inverted_range_is_validation_error() {
        let catalog = catalog().await;
        let result = catalog.scan_by_year_range(TABLE, 2010, 2000).await;
        assert!(matches!(result, Err(RepositoryError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_skips_item_without_title() {
        let catalog = catalog().await;
        catalog.put_movie(TABLE, &matrix()).await.unwrap();
        let mut broken = Item::new();
        broken.insert("Year".to_string(), number(2001));
        catalog.store().insert_raw(TABLE, broken).await.unwrap();
        catalog
            .put_movie(TABLE, &Movie::new(2002, "Solaris"))
            .await
            .unwrap();

        let listed = catalog.list_movies(TABLE).await.unwrap();

        assert_eq!(listed.records, vec![matrix(), Movie::new(2002, "Solaris")]);
        assert_eq!(listed.faults.len(), 1);
        assert_eq!(listed.faults[0].index, 1);
    }

    // ------------------------------------------------------------------------
    // End to end
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_table_lifecycle_end_to_end() {
        let catalog = MovieCatalog::new(InMemoryStore::new());

        catalog.create_table("t1").await.unwrap();
        assert!(catalog.list_tables().await.unwrap().contains(&"t1".to_string()));

        catalog.put_movie("t1", &matrix()).await.unwrap();
        assert!(matches!(
            catalog.put_movie("t1", &matrix()).await,
            Err(RepositoryError::AlreadyExists { .. })
        ));

        catalog
            .update_movie(
                "t1",
                &matrix().key(),
                &MovieInfo::new().with_plot("Neo wakes up.").with_rank(1),
            )
            .await
            .unwrap();
        let details = catalog
            .get_movie("t1", &matrix().key())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(details.info.plot.as_deref(), Some("Neo wakes up."));
        assert_eq!(details.info.rank, Some(1));

        catalog.delete_table("t1").await.unwrap();
        assert!(!catalog.list_tables().await.unwrap().contains(&"t1".to_string()));
    }
}
