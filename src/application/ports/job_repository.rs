use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::entities::{Job, NewJob};
use crate::sql::{FilterParams, UpdatePayload};
#[cfg(test)]
use mockall::{automock, predicate::*};

/// Port for job persistence operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &NewJob) -> Result<Job, RepositoryError>;

    /// List jobs matching the filters, ordered by title
    async fn find_all(&self, filters: &FilterParams) -> Result<Vec<Job>, RepositoryError>;

    async fn get(&self, id: i32) -> Result<Job, RepositoryError>;

    async fn update(&self, id: i32, payload: &UpdatePayload) -> Result<Job, RepositoryError>;

    async fn remove(&self, id: i32) -> Result<(), RepositoryError>;
}
