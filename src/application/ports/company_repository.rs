use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{Company, CompanyDetail, NewCompany};
use crate::sql::{FilterParams, InvalidInput, UpdatePayload};
#[cfg(test)]
use mockall::{automock, predicate::*};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    /// Database failure surfaced unmodified
    #[error("Database error: {0}")]
    Downstream(#[from] sqlx::Error),
}

/// Port for company persistence operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Insert a company, failing with `Duplicate` if the handle exists
    async fn create(&self, company: &NewCompany) -> Result<Company, RepositoryError>;

    /// List companies matching the filters, ordered by name
    async fn find_all(&self, filters: &FilterParams) -> Result<Vec<Company>, RepositoryError>;

    /// Company plus its jobs
    async fn get(&self, handle: &str) -> Result<CompanyDetail, RepositoryError>;

    /// Partial update of the given fields
    async fn update(
        &self,
        handle: &str,
        payload: &UpdatePayload,
    ) -> Result<Company, RepositoryError>;

    async fn remove(&self, handle: &str) -> Result<(), RepositoryError>;
}
