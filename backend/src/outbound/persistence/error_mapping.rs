//! Shared Diesel error mapping for the repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// How a repository reports each class of Diesel failure.
pub(crate) struct ErrorMapping<Q, C, U> {
    pub query: Q,
    pub connection: C,
    /// Called with the violated constraint's name, if the driver reports it.
    pub unique_violation: U,
}

/// Map a Diesel error through `mapping`.
pub(crate) fn map_diesel_error<E, Q, C, U>(error: DieselError, mapping: ErrorMapping<Q, C, U>) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
    U: FnOnce(Option<&str>) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            (mapping.unique_violation)(info.constraint_name())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            (mapping.connection)("database connection error")
        }
        DieselError::NotFound => (mapping.query)("record not found"),
        DieselError::QueryBuilderError(_) => (mapping.query)("database query error"),
        _ => (mapping.query)("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(&'static str),
        Connection(&'static str),
        Unique(Option<String>),
    }

    fn map(error: DieselError) -> Mapped {
        map_diesel_error(
            error,
            ErrorMapping {
                query: Mapped::Query,
                connection: Mapped::Connection,
                unique_violation: |name: Option<&str>| Mapped::Unique(name.map(str::to_owned)),
            },
        )
    }

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(String::from("boom")))
    }

    #[rstest]
    fn unique_violations_reach_the_repository() {
        assert_eq!(
            map(database_error(DatabaseErrorKind::UniqueViolation)),
            Mapped::Unique(None)
        );
    }

    #[rstest]
    #[case(database_error(DatabaseErrorKind::ClosedConnection), Mapped::Connection("database connection error"))]
    #[case(DieselError::NotFound, Mapped::Query("record not found"))]
    #[case(database_error(DatabaseErrorKind::ForeignKeyViolation), Mapped::Query("database error"))]
    fn other_failures_map_by_kind(#[case] error: DieselError, #[case] expected: Mapped) {
        assert_eq!(map(error), expected);
    }
}
