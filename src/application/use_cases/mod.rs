mod companies;
mod jobs;

pub use companies::{
    CreateCompanyUseCase, DeleteCompanyUseCase, GetCompanyUseCase, ListCompaniesUseCase,
    UpdateCompanyUseCase,
};
pub use jobs::{CreateJobUseCase, DeleteJobUseCase, GetJobUseCase, ListJobsUseCase, UpdateJobUseCase};
