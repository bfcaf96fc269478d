//! Persistence error taxonomy.

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::models::ValidationError;

/// Errors surfaced by the repositories.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("validation failed: {0}")]
    ValidationFailed(String),

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("database unavailable: {0}")]
    Unavailable(String),
}

impl From<DieselError> for StoreError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => StoreError::NotFound,
            DieselError::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation => {
                    StoreError::ConstraintViolation(info.message().to_string())
                }
                _ => StoreError::Unavailable(info.message().to_string()),
            },
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::ValidationFailed(err.0)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::util::DbErrorInfo;

    fn db_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(DbErrorInfo("boom".to_string())))
    }

    #[test]
    fn test_diesel_error_mapping() {
        assert!(matches!(
            StoreError::from(DieselError::NotFound),
            StoreError::NotFound
        ));
        assert!(matches!(
            StoreError::from(db_error(DatabaseErrorKind::UniqueViolation)),
            StoreError::ConstraintViolation(_)
        ));
        assert!(matches!(
            StoreError::from(db_error(DatabaseErrorKind::ForeignKeyViolation)),
            StoreError::ConstraintViolation(_)
        ));
        assert!(matches!(
            StoreError::from(db_error(DatabaseErrorKind::Unknown)),
            StoreError::Unavailable(_)
        ));
    }
}
