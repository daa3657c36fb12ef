use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

pub mod checklist;
pub mod competitor_product;
pub mod notify;
pub mod order;
pub mod recovery;
pub mod visit;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    PreconditionFailed(String),

    #[error("Concurrent update detected, retry the request")]
    Conflict,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal error: {0}")]
    Repository(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ValidationError(msg) => ServiceError::Validation(msg),
            RepositoryError::PreconditionFailed(msg) => ServiceError::PreconditionFailed(msg),
            RepositoryError::ConcurrencyConflict => ServiceError::Conflict,
            RepositoryError::ConstraintViolation(msg) => ServiceError::Validation(msg),
            other => ServiceError::Repository(other.to_string()),
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}
