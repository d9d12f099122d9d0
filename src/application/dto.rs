use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{
    entities::{Company, CompanyDetail, Job, NewCompany, NewJob},
    errors::DomainError,
    value_objects::CompanyHandle,
};

static HANDLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_-]+$").expect("handle pattern is a valid regex"));

/// Body of a PATCH request, checked against its typed schema before the raw
/// object is turned into an update payload
pub trait PatchRequest: DeserializeOwned + Validate {
    /// Fields that may be omitted but never set to null
    const NON_NULLABLE: &'static [&'static str];
}

/// DTO for company creation
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompanyRequest {
    #[validate(
        length(min = 1, max = 25, message = "handle must be 1-25 characters"),
        regex(
            path = *HANDLE_PATTERN,
            message = "handle must be lowercase letters, digits, '-' or '_'"
        )
    )]
    pub handle: String,
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: String,
    pub description: String,
    #[validate(range(min = 0, message = "numEmployees must be non-negative"))]
    pub num_employees: Option<i32>,
    #[validate(url(message = "logoUrl must be a URL"))]
    pub logo_url: Option<String>,
}

impl TryFrom<NewCompanyRequest> for NewCompany {
    type Error = DomainError;

    fn try_from(request: NewCompanyRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            handle: CompanyHandle::new(request.handle)?,
            name: request.name,
            description: request.description,
            num_employees: request.num_employees,
            logo_url: request.logo_url,
        })
    }
}

/// DTO for company partial update
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyUpdateRequest {
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "numEmployees must be non-negative"))]
    pub num_employees: Option<i32>,
    #[validate(url(message = "logoUrl must be a URL"))]
    pub logo_url: Option<String>,
}

impl PatchRequest for CompanyUpdateRequest {
    const NON_NULLABLE: &'static [&'static str] = &["name", "description"];
}

/// DTO for job creation
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJobRequest {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: String,
    #[validate(range(min = 0, message = "salary must be non-negative"))]
    pub salary: Option<i32>,
    #[validate(range(min = 0.0, max = 1.0, message = "equity must be between 0 and 1"))]
    pub equity: Option<f64>,
    #[validate(length(min = 1, max = 25, message = "companyHandle must be 1-25 characters"))]
    pub company_handle: String,
}

impl TryFrom<NewJobRequest> for NewJob {
    type Error = DomainError;

    fn try_from(request: NewJobRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            title: request.title,
            salary: request.salary,
            equity: request.equity,
            company_handle: CompanyHandle::new(request.company_handle)?,
        })
    }
}

/// DTO for job partial update; a job cannot move between companies
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobUpdateRequest {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: Option<String>,
    #[validate(range(min = 0, message = "salary must be non-negative"))]
    pub salary: Option<i32>,
    #[validate(range(min = 0.0, max = 1.0, message = "equity must be between 0 and 1"))]
    pub equity: Option<f64>,
}

impl PatchRequest for JobUpdateRequest {
    const NON_NULLABLE: &'static [&'static str] = &["title"];
}

/// DTO for company responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDto {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl From<Company> for CompanyDto {
    fn from(company: Company) -> Self {
        Self {
            handle: company.handle,
            name: company.name,
            description: company.description,
            num_employees: company.num_employees,
            logo_url: company.logo_url,
        }
    }
}

/// Job as listed under its company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CompanyJobDto {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<String>,
}

impl From<Job> for CompanyJobDto {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            title: job.title,
            salary: job.salary,
            equity: job.equity,
        }
    }
}

/// DTO for a single company with its jobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetailDto {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
    pub jobs: Vec<CompanyJobDto>,
}

impl From<CompanyDetail> for CompanyDetailDto {
    fn from(detail: CompanyDetail) -> Self {
        let CompanyDetail { company, jobs } = detail;
        Self {
            handle: company.handle,
            name: company.name,
            description: company.description,
            num_employees: company.num_employees,
            logo_url: company.logo_url,
            jobs: jobs.into_iter().map(CompanyJobDto::from).collect(),
        }
    }
}

/// DTO for job responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobDto {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<String>,
    pub company_handle: String,
}

impl From<Job> for JobDto {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            title: job.title,
            salary: job.salary,
            equity: job.equity,
            company_handle: job.company_handle,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompanyResponse {
    pub company: CompanyDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompanyDetailResponse {
    pub company: CompanyDetailDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompanyListResponse {
    pub companies: Vec<CompanyDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobResponse {
    pub job: JobDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobListResponse {
    pub jobs: Vec<JobDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompanyDeletedResponse {
    pub deleted: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobDeletedResponse {
    pub deleted: i32,
}
