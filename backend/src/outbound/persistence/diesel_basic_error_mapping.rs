//! Shared Diesel error mapping for the repositories in this module.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel error variants into query/connection constructors.
///
/// Constraint violations that carry domain meaning must be matched by the
/// caller before falling back to this helper.
pub fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => connection("database connection error"),
        _ => query("database error"),
    }
}

/// Whether the error is a unique constraint violation.
pub fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Whether the error is a foreign key violation.
pub fn is_foreign_key_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)
    )
}

/// Escape `LIKE` wildcards so a search term matches literally.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(String),
        Connection(String),
    }

    fn map(error: DieselError) -> Mapped {
        map_basic_diesel_error(
            error,
            |msg| Mapped::Query(msg.to_owned()),
            |msg| Mapped::Connection(msg.to_owned()),
        )
    }

    #[rstest]
    fn not_found_maps_to_query() {
        assert_eq!(
            map(DieselError::NotFound),
            Mapped::Query("record not found".to_owned())
        );
    }

    #[rstest]
    fn broken_transaction_manager_maps_to_connection() {
        assert!(matches!(
            map(DieselError::BrokenTransactionManager),
            Mapped::Connection(_)
        ));
    }

    #[rstest]
    fn pool_errors_keep_their_message() {
        let mapped = map_basic_pool_error(PoolError::checkout("refused"), Mapped::Connection);

        assert_eq!(mapped, Mapped::Connection("refused".to_owned()));
    }

    #[rstest]
    #[case("hello", "%hello%")]
    #[case("50%", "%50\\%%")]
    #[case("snake_case", "%snake\\_case%")]
    #[case("back\\slash", "%back\\\\slash%")]
    fn like_pattern_escapes_wildcards(#[case] term: &str, #[case] expected: &str) {
        assert_eq!(like_pattern(term), expected);
    }

    #[rstest]
    fn plain_errors_are_not_constraint_violations() {
        assert!(!is_unique_violation(&DieselError::NotFound));
        assert!(!is_foreign_key_violation(&DieselError::NotFound));
    }
}
