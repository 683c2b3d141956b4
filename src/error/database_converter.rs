use crate::error::AppError;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Utility for converting diesel errors into `AppError` variants.
///
/// Store lookups use `.optional()`, so a diesel `NotFound` reaching this
/// converter means a row vanished mid-statement; it is reported as a database
/// failure, never as a domain not-found signal.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a diesel error to an appropriate `AppError` variant.
    ///
    /// # Arguments
    /// * `error` - The diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let field = info
            .column_name()
            .or_else(|| info.constraint_name())
            .unwrap_or("record")
            .to_string();

        match kind {
            DatabaseErrorKind::NotNullViolation => AppError::Validation {
                field,
                reason: "value is required".to_string(),
            },
            DatabaseErrorKind::CheckViolation => AppError::Validation {
                field,
                reason: format!("check constraint failed: {}", info.message()),
            },
            DatabaseErrorKind::ForeignKeyViolation => AppError::Validation {
                field,
                reason: format!("invalid local reference: {}", info.message()),
            },
            _ => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!("Database error: {}", info.message())),
            },
        }
    }
}
