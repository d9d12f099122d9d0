use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::api::middleware::validation::{parse_create, parse_update, JsonObject};
use crate::application::dto::{
    CompanyDeletedResponse, CompanyDetailResponse, CompanyListResponse, CompanyResponse,
    CompanyUpdateRequest, NewCompanyRequest,
};
use crate::application::use_cases::{
    CreateCompanyUseCase, DeleteCompanyUseCase, GetCompanyUseCase, ListCompaniesUseCase,
    UpdateCompanyUseCase,
};
use crate::sql::{FilterParams, COMPANY_FILTERS};

/// POST /companies
#[utoipa::path(
    post,
    path = "/companies",
    tag = "companies",
    request_body = NewCompanyRequest,
    responses(
        (status = 201, description = "Company created", body = CompanyResponse),
        (status = 400, description = "Invalid body or duplicate company"),
        (status = 401, description = "Admin token required")
    ),
    security(("bearer" = []))
)]
pub async fn create_company_handler(
    State(use_case): State<Arc<CreateCompanyUseCase>>,
    JsonObject(body): JsonObject,
) -> Result<(StatusCode, Json<CompanyResponse>), ApiError> {
    let request: NewCompanyRequest = parse_create(body)?;
    let company = use_case.execute(request).await?;
    Ok((StatusCode::CREATED, Json(CompanyResponse { company })))
}

/// GET /companies
/// List companies, optionally filtered by name and employee count
#[utoipa::path(
    get,
    path = "/companies",
    tag = "companies",
    params(
        ("name" = Option<String>, Query, description = "Case-insensitive substring of the name"),
        ("minEmployees" = Option<i64>, Query, description = "Minimum number of employees"),
        ("maxEmployees" = Option<i64>, Query, description = "Maximum number of employees")
    ),
    responses(
        (status = 200, description = "Matching companies ordered by name", body = CompanyListResponse),
        (status = 400, description = "Unknown filter or impossible bounds")
    )
)]
pub async fn list_companies_handler(
    State(use_case): State<Arc<ListCompaniesUseCase>>,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<Json<CompanyListResponse>, ApiError> {
    let filters = FilterParams::from_query(query, &COMPANY_FILTERS)?;
    let companies = use_case.execute(filters).await?;
    Ok(Json(CompanyListResponse { companies }))
}

/// GET /companies/{handle}
#[utoipa::path(
    get,
    path = "/companies/{handle}",
    tag = "companies",
    params(("handle" = String, Path, description = "Company handle")),
    responses(
        (status = 200, description = "Company with its jobs", body = CompanyDetailResponse),
        (status = 404, description = "No such company")
    )
)]
pub async fn get_company_handler(
    State(use_case): State<Arc<GetCompanyUseCase>>,
    Path(handle): Path<String>,
) -> Result<Json<CompanyDetailResponse>, ApiError> {
    let company = use_case.execute(&handle).await?;
    Ok(Json(CompanyDetailResponse { company }))
}

/// PATCH /companies/{handle}
/// Partially update a company; the handle cannot change
#[utoipa::path(
    patch,
    path = "/companies/{handle}",
    tag = "companies",
    params(("handle" = String, Path, description = "Company handle")),
    request_body = CompanyUpdateRequest,
    responses(
        (status = 200, description = "Updated company", body = CompanyResponse),
        (status = 400, description = "Invalid or empty body"),
        (status = 401, description = "Admin token required"),
        (status = 404, description = "No such company")
    ),
    security(("bearer" = []))
)]
pub async fn update_company_handler(
    State(use_case): State<Arc<UpdateCompanyUseCase>>,
    Path(handle): Path<String>,
    JsonObject(body): JsonObject,
) -> Result<Json<CompanyResponse>, ApiError> {
    let payload = parse_update::<CompanyUpdateRequest>(body)?;
    let company = use_case.execute(&handle, payload).await?;
    Ok(Json(CompanyResponse { company }))
}

/// DELETE /companies/{handle}
#[utoipa::path(
    delete,
    path = "/companies/{handle}",
    tag = "companies",
    params(("handle" = String, Path, description = "Company handle")),
    responses(
        (status = 200, description = "Company deleted", body = CompanyDeletedResponse),
        (status = 401, description = "Admin token required"),
        (status = 404, description = "No such company")
    ),
    security(("bearer" = []))
)]
pub async fn delete_company_handler(
    State(use_case): State<Arc<DeleteCompanyUseCase>>,
    Path(handle): Path<String>,
) -> Result<Json<CompanyDeletedResponse>, ApiError> {
    use_case.execute(&handle).await?;
    Ok(Json(CompanyDeletedResponse { deleted: handle }))
}
