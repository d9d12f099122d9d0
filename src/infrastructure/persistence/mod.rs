mod postgres_company_repository;
mod postgres_job_repository;
mod query_builder;

pub use postgres_company_repository::PostgresCompanyRepository;
pub use postgres_job_repository::PostgresJobRepository;
pub use query_builder::{bind_values, QueryBuilder};
