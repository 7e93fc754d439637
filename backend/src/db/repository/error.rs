//! Failures reported by the storage backends.
//!
//! A record that does not exist is a [`RepositoryError::NotFound`] naming the
//! entity and id, which the services turn into a 404. Everything else is a
//! backend failure. Connection failures are always worth retrying; query
//! failures only when Postgres reports a serialization conflict.

use std::fmt;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// The backend step that failed, attached to connection, query and internal
/// errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// e.g. "create_pool", "get_connection"
    pub operation: Option<String>,
    pub details: Option<String>,
    pub retryable: bool,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }
}

// Renders as " (during op: details)" so it can trail the message directly.
impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.operation, &self.details) {
            (Some(op), Some(details)) => write!(f, " (during {}: {})", op, details),
            (Some(op), None) => write!(f, " (during {})", op),
            (None, Some(details)) => write!(f, " ({})", details),
            (None, None) => Ok(()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// No animal, category, enclosure or zoo with this id.
    #[error("{entity} {id} not found")]
    NotFound { entity: String, id: String },

    #[error("Connection error: {message}{context}")]
    Connection {
        message: String,
        context: ErrorContext,
    },

    #[error("Query error: {message}{context}")]
    Query {
        message: String,
        context: ErrorContext,
    },

    /// Bad `repository.toml`, policy value or environment.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Stored data that cannot be decoded, failed migrations, join errors.
    #[error("Internal error: {message}{context}")]
    Internal {
        message: String,
        context: ErrorContext,
    },
}

impl RepositoryError {
    /// Not-found error for a single record lookup.
    pub fn missing(entity: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::connection_with_context(message, ErrorContext::default())
    }

    pub fn connection_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Connection {
            message: message.into(),
            context: context.retryable(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::internal_with_context(message, ErrorContext::default())
    }

    pub fn internal_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Internal {
            message: message.into(),
            context,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection { context, .. } | Self::Query { context, .. } => context.retryable,
            _ => false,
        }
    }
}

#[cfg(feature = "postgres-repo")]
impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};

        match err {
            // Lookups go through `.optional()`, so an empty result here means a
            // write returned no row.
            Error::NotFound => RepositoryError::query("Statement returned no row"),
            Error::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
                RepositoryError::connection(info.message().to_string())
            }
            Error::DatabaseError(kind, info) => {
                let mut context = ErrorContext::default().with_details(format!("{:?}", kind));
                if matches!(kind, DatabaseErrorKind::SerializationFailure) {
                    context = context.retryable();
                }
                RepositoryError::Query {
                    message: info.message().to_string(),
                    context,
                }
            }
            Error::DeserializationError(e) => {
                RepositoryError::internal(format!("Cannot decode row: {}", e))
            }
            other => RepositoryError::query(other.to_string()),
        }
    }
}
