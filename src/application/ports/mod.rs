mod company_repository;
mod job_repository;

pub use company_repository::{CompanyRepository, RepositoryError};
pub use job_repository::JobRepository;

#[cfg(test)]
pub use company_repository::MockCompanyRepository;
#[cfg(test)]
pub use job_repository::MockJobRepository;
