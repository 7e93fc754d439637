//! Errors surfaced by the domain services.

use thiserror::Error;

use crate::db::repository::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The addressed record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The input is malformed or references records that do not exist.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The request is well-formed but not allowed in the current state.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        ServiceError::NotFound(format!("{} {} not found", entity, id))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ServiceError::Validation(msg.into())
    }

    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        ServiceError::InvalidOperation(msg.into())
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            err @ RepositoryError::NotFound { .. } => ServiceError::NotFound(err.to_string()),
            other => {
                log::error!("Repository failure: {}", other);
                ServiceError::Repository(other)
            }
        }
    }
}
