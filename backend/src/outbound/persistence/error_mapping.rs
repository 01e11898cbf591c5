//! Translation of pool and Diesel failures into [`RepositoryError`].

use std::fmt::Display;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

pub(crate) fn map_pool_error(error: PoolError) -> RepositoryError {
    RepositoryError::connection(error.into_message())
}

/// Entity named by a foreign key constraint such as
/// `customer_bookmarks_mentor_id_fkey`.
fn referenced_entity(constraint: Option<&str>) -> String {
    constraint
        .and_then(|name| name.strip_suffix("_id_fkey"))
        .and_then(|prefix| prefix.rsplit('_').next())
        .filter(|entity| !entity.is_empty())
        .map_or_else(|| "referenced record".to_owned(), str::to_owned)
}

/// Map a Diesel failure on `entity` identified by `key`.
///
/// Missing rows and foreign key violations become `NotFound`, unique
/// violations become `AlreadyExists`, closed connections become
/// `Connection`, and everything else becomes `Query`.
pub(crate) fn map_diesel_error(
    error: DieselError,
    entity: &str,
    key: &dyn Display,
) -> RepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), entity, "diesel operation failed");
        }
        _ => debug!(%error, entity, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => RepositoryError::not_found(entity, key.to_string()),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            RepositoryError::already_exists(entity, key.to_string())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            RepositoryError::not_found(referenced_entity(info.constraint_name()), key.to_string())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RepositoryError::connection("database connection error")
        }
        other => RepositoryError::query(other.to_string()),
    }
}

/// Map a stored value that no longer parses into a domain value.
pub(crate) fn corrupt_row(entity: &str, cause: impl Display) -> RepositoryError {
    RepositoryError::query(format!("stored {entity} is invalid: {cause}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("customer_bookmarks_mentor_id_fkey"), "mentor")]
    #[case(Some("persons_user_id_fkey"), "user")]
    #[case(Some("odd_constraint"), "referenced record")]
    #[case(None, "referenced record")]
    fn foreign_key_constraint_names_the_entity(
        #[case] constraint: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(referenced_entity(constraint), expected);
    }

    #[rstest]
    fn missing_rows_map_to_not_found() {
        let error = map_diesel_error(DieselError::NotFound, "mentor", &"abc");
        assert_eq!(error, RepositoryError::not_found("mentor", "abc"));
    }

    #[rstest]
    fn unique_violations_map_to_already_exists() {
        let error = map_diesel_error(
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                Box::new("duplicate key".to_owned()),
            ),
            "user",
            &"ada@example.com",
        );
        assert_eq!(error, RepositoryError::already_exists("user", "ada@example.com"));
    }

    #[rstest]
    fn closed_connections_map_to_connection_errors() {
        let error = map_diesel_error(
            DieselError::DatabaseError(
                DatabaseErrorKind::ClosedConnection,
                Box::new("server closed the connection".to_owned()),
            ),
            "user",
            &"key",
        );
        assert!(matches!(error, RepositoryError::Connection { .. }));
    }

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let error = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(error, RepositoryError::connection("timed out"));
    }
}
