use axum::response::Json;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::health::{HealthResponse, ReadinessResponse};
use crate::application::dto::{
    CompanyDeletedResponse, CompanyDetailDto, CompanyDetailResponse, CompanyDto, CompanyJobDto,
    CompanyListResponse, CompanyResponse, CompanyUpdateRequest, JobDeletedResponse, JobDto,
    JobListResponse, JobResponse, JobUpdateRequest, NewCompanyRequest, NewJobRequest,
};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// OpenAPI specification for the Jobly API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Jobly API",
        version = "1.0.0",
        description = "Companies and job postings with filtered search"
    ),
    servers(
        (url = "http://localhost:3001", description = "Local development server")
    ),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::health::readiness_handler,
        crate::api::handlers::companies::create_company_handler,
        crate::api::handlers::companies::list_companies_handler,
        crate::api::handlers::companies::get_company_handler,
        crate::api::handlers::companies::update_company_handler,
        crate::api::handlers::companies::delete_company_handler,
        crate::api::handlers::jobs::create_job_handler,
        crate::api::handlers::jobs::list_jobs_handler,
        crate::api::handlers::jobs::get_job_handler,
        crate::api::handlers::jobs::update_job_handler,
        crate::api::handlers::jobs::delete_job_handler,
    ),
    components(
        schemas(
            HealthResponse,
            ReadinessResponse,
            NewCompanyRequest,
            CompanyUpdateRequest,
            CompanyDto,
            CompanyJobDto,
            CompanyDetailDto,
            CompanyResponse,
            CompanyDetailResponse,
            CompanyListResponse,
            CompanyDeletedResponse,
            NewJobRequest,
            JobUpdateRequest,
            JobDto,
            JobResponse,
            JobListResponse,
            JobDeletedResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "companies", description = "Company listings"),
        (name = "jobs", description = "Job postings")
    )
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json
pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_all_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for path in [
            "/health",
            "/health/ready",
            "/companies",
            "/companies/{handle}",
            "/jobs",
            "/jobs/{id}",
        ] {
            assert!(paths.iter().any(|p| *p == path), "missing {path}");
        }
    }

    #[test]
    fn test_openapi_declares_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer"));
    }
}
