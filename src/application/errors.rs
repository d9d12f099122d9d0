//! Common error type for company and job use cases

use thiserror::Error;

use crate::application::ports::RepositoryError;
use crate::domain::errors::DomainError;
use crate::sql::InvalidInput;

#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("{0}")]
    InvalidInput(InvalidInput),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("Repository error: {0}")]
    Repository(RepositoryError),
}

impl From<InvalidInput> for UseCaseError {
    fn from(err: InvalidInput) -> Self {
        Self::InvalidInput(err)
    }
}

impl From<RepositoryError> for UseCaseError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::InvalidInput(e) => Self::InvalidInput(e),
            RepositoryError::NotFound(msg) => Self::NotFound(msg),
            RepositoryError::Duplicate(msg) => Self::Duplicate(msg),
            other => Self::Repository(other),
        }
    }
}
