use std::sync::Arc;

use tracing::info;

use crate::application::{
    dto::{JobDto, NewJobRequest},
    errors::UseCaseError,
    ports::JobRepository,
};
use crate::domain::entities::NewJob;
use crate::sql::{FilterParams, UpdatePayload};

/// Use case for creating jobs
pub struct CreateJobUseCase {
    repository: Arc<dyn JobRepository>,
}

impl CreateJobUseCase {
    pub fn new(repository: Arc<dyn JobRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, request: NewJobRequest) -> Result<JobDto, UseCaseError> {
        let new_job = NewJob::try_from(request)?;
        let job = self.repository.create(&new_job).await?;
        info!(id = job.id, company = %job.company_handle, "Job created");
        Ok(job.into())
    }
}

/// Use case for listing jobs with optional filters
pub struct ListJobsUseCase {
    repository: Arc<dyn JobRepository>,
}

impl ListJobsUseCase {
    pub fn new(repository: Arc<dyn JobRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, filters: FilterParams) -> Result<Vec<JobDto>, UseCaseError> {
        let jobs = self.repository.find_all(&filters).await?;
        Ok(jobs.into_iter().map(JobDto::from).collect())
    }
}

pub struct GetJobUseCase {
    repository: Arc<dyn JobRepository>,
}

impl GetJobUseCase {
    pub fn new(repository: Arc<dyn JobRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: i32) -> Result<JobDto, UseCaseError> {
        Ok(self.repository.get(id).await?.into())
    }
}

pub struct UpdateJobUseCase {
    repository: Arc<dyn JobRepository>,
}

impl UpdateJobUseCase {
    pub fn new(repository: Arc<dyn JobRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: i32, payload: UpdatePayload) -> Result<JobDto, UseCaseError> {
        let job = self.repository.update(id, &payload).await?;
        info!(id, fields = payload.len(), "Job updated");
        Ok(job.into())
    }
}

pub struct DeleteJobUseCase {
    repository: Arc<dyn JobRepository>,
}

impl DeleteJobUseCase {
    pub fn new(repository: Arc<dyn JobRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: i32) -> Result<(), UseCaseError> {
        self.repository.remove(id).await?;
        info!(id, "Job deleted");
        Ok(())
    }
}
