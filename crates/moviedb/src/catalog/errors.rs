//! Mapping of store faults to repository errors.
//!
//! The same store fault means different things depending on the request that
//! produced it, so there is one mapper per kind of operation.

use moviedb_core::storage::{RepositoryError, StoreError};

/// Map a fault that carries no operation-specific meaning.
pub fn map_store_error(err: StoreError) -> RepositoryError {
    match err {
        StoreError::Validation(message) => RepositoryError::Validation(message),
        StoreError::ConditionalCheckFailed => {
            RepositoryError::Transport("Unexpected conditional check failure".to_string())
        }
        StoreError::ResourceInUse(message)
        | StoreError::ResourceNotFound(message)
        | StoreError::Transport(message) => RepositoryError::Transport(message),
    }
}

/// Map a fault from a put guarded by "key absent".
pub fn map_insert_error(
    err: StoreError,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    match err {
        StoreError::ConditionalCheckFailed => RepositoryError::AlreadyExists {
            entity_type,
            id: id.into(),
        },
        err => map_store_error(err),
    }
}

/// Map a fault from a write guarded by "key present".
pub fn map_guarded_write_error(
    err: StoreError,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    match err {
        StoreError::ConditionalCheckFailed => RepositoryError::NotFound {
            entity_type,
            id: id.into(),
        },
        err => map_store_error(err),
    }
}

/// Map a CreateTable fault.
pub fn map_create_table_error(err: StoreError, table_name: &str) -> RepositoryError {
    match err {
        StoreError::ResourceInUse(_) => RepositoryError::AlreadyExists {
            entity_type: "Table",
            id: table_name.to_string(),
        },
        err => map_store_error(err),
    }
}

/// Map a DeleteTable fault.
pub fn map_delete_table_error(err: StoreError, table_name: &str) -> RepositoryError {
    match err {
        StoreError::ResourceNotFound(_) => RepositoryError::NotFound {
            entity_type: "Table",
            id: table_name.to_string(),
        },
        err => map_store_error(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_condition_failure_is_already_exists() {
        let err = map_insert_error(StoreError::ConditionalCheckFailed, "Movie", "1999/The Matrix");
        assert_eq!(
            err,
            RepositoryError::AlreadyExists {
                entity_type: "Movie",
                id: "1999/The Matrix".to_string()
            }
        );
    }

    #[test]
    fn test_guarded_write_condition_failure_is_not_found() {
        let err = map_guarded_write_error(StoreError::ConditionalCheckFailed, "Movie", "2000/X");
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[test]
    fn test_insert_transport_is_reraised() {
        let err = map_insert_error(
            StoreError::Transport("connection reset".to_string()),
            "Movie",
            "x",
        );
        assert_eq!(err, RepositoryError::Transport("connection reset".to_string()));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_validation_is_preserved() {
        let err = map_insert_error(StoreError::Validation("bad key".to_string()), "Movie", "x");
        assert_eq!(err, RepositoryError::Validation("bad key".to_string()));
    }

    #[test]
    fn test_missing_table_on_item_write_is_transport() {
        let err = map_insert_error(
            StoreError::ResourceNotFound("Requested resource not found".to_string()),
            "Movie",
            "x",
        );
        assert!(matches!(err, RepositoryError::Transport(_)));
    }

    #[test]
    fn test_table_errors() {
        assert_eq!(
            map_create_table_error(StoreError::ResourceInUse("in use".to_string()), "t1"),
            RepositoryError::AlreadyExists {
                entity_type: "Table",
                id: "t1".to_string()
            }
        );
        assert_eq!(
            map_delete_table_error(StoreError::ResourceNotFound("gone".to_string()), "t1"),
            RepositoryError::NotFound {
                entity_type: "Table",
                id: "t1".to_string()
            }
        );
        assert!(matches!(
            map_delete_table_error(StoreError::ResourceInUse("busy".to_string()), "t1"),
            RepositoryError::Transport(_)
        ));
    }
}
