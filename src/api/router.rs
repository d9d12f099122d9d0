use axum::{
    middleware as axum_middleware,
    routing::{get, MethodRouter},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api::handlers::{
    create_company_handler, create_job_handler, delete_company_handler, delete_job_handler,
    get_company_handler, get_job_handler, health_handler, list_companies_handler,
    list_jobs_handler, readiness_handler, update_company_handler, update_job_handler,
};
use crate::api::middleware::auth::{self, JwtKeys};
use crate::api::openapi::openapi_handler;
use crate::application::ports::{CompanyRepository, JobRepository};
use crate::application::use_cases::{
    CreateCompanyUseCase, CreateJobUseCase, DeleteCompanyUseCase, DeleteJobUseCase,
    GetCompanyUseCase, GetJobUseCase, ListCompaniesUseCase, ListJobsUseCase, UpdateCompanyUseCase,
    UpdateJobUseCase,
};

/// Application state container
#[derive(Clone)]
pub struct AppState {
    pub pool: Option<Arc<PgPool>>,
    pub jwt_keys: Arc<JwtKeys>,
    pub create_company_use_case: Arc<CreateCompanyUseCase>,
    pub list_companies_use_case: Arc<ListCompaniesUseCase>,
    pub get_company_use_case: Arc<GetCompanyUseCase>,
    pub update_company_use_case: Arc<UpdateCompanyUseCase>,
    pub delete_company_use_case: Arc<DeleteCompanyUseCase>,
    pub create_job_use_case: Arc<CreateJobUseCase>,
    pub list_jobs_use_case: Arc<ListJobsUseCase>,
    pub get_job_use_case: Arc<GetJobUseCase>,
    pub update_job_use_case: Arc<UpdateJobUseCase>,
    pub delete_job_use_case: Arc<DeleteJobUseCase>,
}

impl AppState {
    /// Wire every use case to the given repositories
    pub fn new(
        company_repo: Arc<dyn CompanyRepository>,
        job_repo: Arc<dyn JobRepository>,
        jwt_keys: JwtKeys,
    ) -> Self {
        Self {
            pool: None,
            jwt_keys: Arc::new(jwt_keys),
            create_company_use_case: Arc::new(CreateCompanyUseCase::new(Arc::clone(&company_repo))),
            list_companies_use_case: Arc::new(ListCompaniesUseCase::new(Arc::clone(&company_repo))),
            get_company_use_case: Arc::new(GetCompanyUseCase::new(Arc::clone(&company_repo))),
            update_company_use_case: Arc::new(UpdateCompanyUseCase::new(Arc::clone(&company_repo))),
            delete_company_use_case: Arc::new(DeleteCompanyUseCase::new(company_repo)),
            create_job_use_case: Arc::new(CreateJobUseCase::new(Arc::clone(&job_repo))),
            list_jobs_use_case: Arc::new(ListJobsUseCase::new(Arc::clone(&job_repo))),
            get_job_use_case: Arc::new(GetJobUseCase::new(Arc::clone(&job_repo))),
            update_job_use_case: Arc::new(UpdateJobUseCase::new(Arc::clone(&job_repo))),
            delete_job_use_case: Arc::new(DeleteJobUseCase::new(job_repo)),
        }
    }

    /// Pool used by the readiness probe
    pub fn with_pool(mut self, pool: Arc<PgPool>) -> Self {
        self.pool = Some(pool);
        self
    }
}

/// Method router whose handlers require an admin user
fn admin_only(router: MethodRouter) -> MethodRouter {
    router.route_layer(axum_middleware::from_fn(auth::ensure_admin))
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let company_routes = Router::new()
        .route(
            "/companies",
            get(list_companies_handler)
                .with_state(Arc::clone(&state.list_companies_use_case))
                .merge(admin_only(
                    axum::routing::post(create_company_handler)
                        .with_state(Arc::clone(&state.create_company_use_case)),
                )),
        )
        .route(
            "/companies/{handle}",
            get(get_company_handler)
                .with_state(Arc::clone(&state.get_company_use_case))
                .merge(admin_only(
                    axum::routing::patch(update_company_handler)
                        .with_state(Arc::clone(&state.update_company_use_case)),
                ))
                .merge(admin_only(
                    axum::routing::delete(delete_company_handler)
                        .with_state(Arc::clone(&state.delete_company_use_case)),
                )),
        );

    let job_routes = Router::new()
        .route(
            "/jobs",
            get(list_jobs_handler)
                .with_state(Arc::clone(&state.list_jobs_use_case))
                .merge(admin_only(
                    axum::routing::post(create_job_handler)
                        .with_state(Arc::clone(&state.create_job_use_case)),
                )),
        )
        .route(
            "/jobs/{id}",
            get(get_job_handler)
                .with_state(Arc::clone(&state.get_job_use_case))
                .merge(admin_only(
                    axum::routing::patch(update_job_handler)
                        .with_state(Arc::clone(&state.update_job_use_case)),
                ))
                .merge(admin_only(
                    axum::routing::delete(delete_job_handler)
                        .with_state(Arc::clone(&state.delete_job_use_case)),
                )),
        );

    Router::new()
        // Health check (no auth required)
        .route("/health", get(health_handler))
        .route(
            "/health/ready",
            get(readiness_handler).with_state(state.pool.clone()),
        )
        .route("/api-docs/openapi.json", get(openapi_handler))
        .merge(company_routes)
        .merge(job_routes)
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&state.jwt_keys),
            auth::authenticate,
        ))
        .layer(TraceLayer::new_for_http())
}
