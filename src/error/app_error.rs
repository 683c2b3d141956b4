use crate::error::DatabaseErrorConverter;
use thiserror::Error;

/// Application-wide error type that represents all possible errors in the system.
///
/// Local absence (`NotFound`) and peer failures (`PeerNotFound`,
/// `PeerUnavailable`) are separate variants.
#[derive(Error, Debug)]
pub enum AppError {
    /// A record owned by this service does not exist under the given key
    #[error("{entity} with id: {id} not found")]
    NotFound { entity: String, id: String },

    /// A peer service answered, but has no entity under the requested id
    #[error("{peer} has no entity with id: {id}")]
    PeerNotFound { peer: String, id: String },

    /// A peer service could not be reached or returned an unusable answer
    #[error("{peer} unavailable: {message}")]
    PeerUnavailable {
        peer: String,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Builds the not-found signal for a locally owned record.
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        AppError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// True for failures caused by a peer service rather than by this one.
    pub fn is_peer_failure(&self) -> bool {
        matches!(
            self,
            AppError::PeerNotFound { .. } | AppError::PeerUnavailable { .. }
        )
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<bb8::RunError<diesel_async::pooled_connection::PoolError>> for AppError {
    fn from(error: bb8::RunError<diesel_async::pooled_connection::PoolError>) -> Self {
        AppError::ConnectionPool {
            source: anyhow::Error::from(error),
        }
    }
}

impl From<crate::config::error::ConfigError> for AppError {
    fn from(error: crate::config::error::ConfigError) -> Self {
        AppError::Configuration {
            key: error.key().to_string(),
            source: anyhow::Error::from(error),
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    /// Reports the first failing field, in field-name order.
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        match fields.first() {
            Some((field, failures)) => AppError::Validation {
                field: field.to_string(),
                reason: failures
                    .iter()
                    .map(|f| match &f.message {
                        Some(message) => message.to_string(),
                        None => f.code.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(", "),
            },
            None => AppError::Validation {
                field: "body".to_string(),
                reason: errors.to_string(),
            },
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
