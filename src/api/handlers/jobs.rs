use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::api::middleware::validation::{parse_create, parse_update, JsonObject};
use crate::application::dto::{
    JobDeletedResponse, JobListResponse, JobResponse, JobUpdateRequest, NewJobRequest,
};
use crate::application::use_cases::{
    CreateJobUseCase, DeleteJobUseCase, GetJobUseCase, ListJobsUseCase, UpdateJobUseCase,
};
use crate::domain::errors::DomainError;
use crate::sql::{FilterParams, JOB_FILTERS};

fn parse_job_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .map_err(|_| ApiError::bad_request(DomainError::InvalidJobId(raw.to_string()).to_string()))
}

/// POST /jobs
#[utoipa::path(
    post,
    path = "/jobs",
    tag = "jobs",
    request_body = NewJobRequest,
    responses(
        (status = 201, description = "Job created", body = JobResponse),
        (status = 400, description = "Invalid body"),
        (status = 401, description = "Admin token required")
    ),
    security(("bearer" = []))
)]
pub async fn create_job_handler(
    State(use_case): State<Arc<CreateJobUseCase>>,
    JsonObject(body): JsonObject,
) -> Result<(StatusCode, Json<JobResponse>), ApiError> {
    let request: NewJobRequest = parse_create(body)?;
    let job = use_case.execute(request).await?;
    Ok((StatusCode::CREATED, Json(JobResponse { job })))
}

/// GET /jobs
/// List jobs, optionally filtered by title, salary floor and equity
#[utoipa::path(
    get,
    path = "/jobs",
    tag = "jobs",
    params(
        ("title" = Option<String>, Query, description = "Case-insensitive substring of the title"),
        ("minSalary" = Option<i64>, Query, description = "Minimum salary"),
        ("hasEquity" = Option<bool>, Query, description = "Only jobs with non-zero equity when true")
    ),
    responses(
        (status = 200, description = "Matching jobs ordered by title", body = JobListResponse),
        (status = 400, description = "Unknown or malformed filter")
    )
)]
pub async fn list_jobs_handler(
    State(use_case): State<Arc<ListJobsUseCase>>,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<Json<JobListResponse>, ApiError> {
    let filters = FilterParams::from_query(query, &JOB_FILTERS)?;
    let jobs = use_case.execute(filters).await?;
    Ok(Json(JobListResponse { jobs }))
}

/// GET /jobs/{id}
#[utoipa::path(
    get,
    path = "/jobs/{id}",
    tag = "jobs",
    params(("id" = i32, Path, description = "Job id")),
    responses(
        (status = 200, description = "Job", body = JobResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "No such job")
    )
)]
pub async fn get_job_handler(
    State(use_case): State<Arc<GetJobUseCase>>,
    Path(id): Path<String>,
) -> Result<Json<JobResponse>, ApiError> {
    let job = use_case.execute(parse_job_id(&id)?).await?;
    Ok(Json(JobResponse { job }))
}

/// PATCH /jobs/{id}
/// Partially update a job; id and companyHandle cannot change
#[utoipa::path(
    patch,
    path = "/jobs/{id}",
    tag = "jobs",
    params(("id" = i32, Path, description = "Job id")),
    request_body = JobUpdateRequest,
    responses(
        (status = 200, description = "Updated job", body = JobResponse),
        (status = 400, description = "Invalid or empty body"),
        (status = 401, description = "Admin token required"),
        (status = 404, description = "No such job")
    ),
    security(("bearer" = []))
)]
pub async fn update_job_handler(
    State(use_case): State<Arc<UpdateJobUseCase>>,
    Path(id): Path<String>,
    JsonObject(body): JsonObject,
) -> Result<Json<JobResponse>, ApiError> {
    let id = parse_job_id(&id)?;
    let payload = parse_update::<JobUpdateRequest>(body)?;
    let job = use_case.execute(id, payload).await?;
    Ok(Json(JobResponse { job }))
}

/// DELETE /jobs/{id}
#[utoipa::path(
    delete,
    path = "/jobs/{id}",
    tag = "jobs",
    params(("id" = i32, Path, description = "Job id")),
    responses(
        (status = 200, description = "Job deleted", body = JobDeletedResponse),
        (status = 401, description = "Admin token required"),
        (status = 404, description = "No such job")
    ),
    security(("bearer" = []))
)]
pub async fn delete_job_handler(
    State(use_case): State<Arc<DeleteJobUseCase>>,
    Path(id): Path<String>,
) -> Result<Json<JobDeletedResponse>, ApiError> {
    let id = parse_job_id(&id)?;
    use_case.execute(id).await?;
    Ok(Json(JobDeletedResponse { deleted: id }))
}
