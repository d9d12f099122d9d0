use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::query_builder::{bind_values, QueryBuilder};
use super::postgres_job_repository::JobRow;
use crate::application::ports::{CompanyRepository, RepositoryError};
use crate::domain::entities::{Company, CompanyDetail, NewCompany};
use crate::sql::{
    build_company_filter, build_set_clause, FieldNameMap, FilterParams, SqlValue, UpdatePayload,
};

/// Logical company fields whose column names differ
const COMPANY_FIELDS: FieldNameMap<'static> =
    FieldNameMap::new(&[("numEmployees", "num_employees"), ("logoUrl", "logo_url")]);

#[derive(Debug, sqlx::FromRow)]
#[sqlx(rename_all = "camelCase")]
struct CompanyRow {
    handle: String,
    name: String,
    description: String,
    num_employees: Option<i32>,
    logo_url: Option<String>,
}

impl CompanyRow {
    fn into_domain(self) -> Company {
        Company {
            handle: self.handle,
            name: self.name,
            description: self.description,
            num_employees: self.num_employees,
            logo_url: self.logo_url,
        }
    }
}

/// Unique constraint Postgres generates for `companies.name`
const NAME_CONSTRAINT: &str = "companies_name_key";

/// Name the value that collided: the name when its constraint fired, otherwise the handle
fn duplicate_message(constraint: Option<&str>, handle: &str, name: Option<&str>) -> String {
    match (constraint, name) {
        (Some(NAME_CONSTRAINT), Some(name)) => format!("Duplicate company name: {name}"),
        _ => format!("Duplicate company: {handle}"),
    }
}

fn map_unique_violation(err: sqlx::Error, handle: &str, name: Option<&str>) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::Duplicate(duplicate_message(db.constraint(), handle, name))
        }
        _ => RepositoryError::Downstream(err),
    }
}

/// PostgreSQL implementation of company repository
pub struct PostgresCompanyRepository {
    pool: PgPool,
}

impl PostgresCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyRepository for PostgresCompanyRepository {
    async fn create(&self, company: &NewCompany) -> Result<Company, RepositoryError> {
        let existing =
            sqlx::query_scalar::<_, String>("SELECT handle FROM companies WHERE handle = $1")
                .bind(company.handle.as_str())
                .fetch_optional(&self.pool)
                .await?;

        if existing.is_some() {
            return Err(RepositoryError::Duplicate(format!(
                "Duplicate company: {}",
                company.handle
            )));
        }

        let sql = format!(
            r#"
            INSERT INTO companies (handle, name, description, num_employees, logo_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            QueryBuilder::COMPANY_COLUMNS
        );

        let row = sqlx::query_as::<_, CompanyRow>(&sql)
            .bind(company.handle.as_str())
            .bind(&company.name)
            .bind(&company.description)
            .bind(company.num_employees)
            .bind(company.logo_url.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, company.handle.as_str(), Some(&company.name)))?;

        Ok(row.into_domain())
    }

    async fn find_all(&self, filters: &FilterParams) -> Result<Vec<Company>, RepositoryError> {
        let (where_clause, values) = build_company_filter(filters)?
            .map(|filter| filter.into_parts())
            .unwrap_or_default();

        let sql = QueryBuilder::select_companies(&where_clause);
        debug!(%sql, params = values.len(), "Listing companies");

        let rows = bind_values(sqlx::query_as::<_, CompanyRow>(&sql), &values)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(CompanyRow::into_domain).collect())
    }

    async fn get(&self, handle: &str) -> Result<CompanyDetail, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM companies WHERE handle = $1",
            QueryBuilder::COMPANY_COLUMNS
        );
        let company = sqlx::query_as::<_, CompanyRow>(&sql)
            .bind(handle)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("No company: {handle}")))?;

        let sql = format!(
            "SELECT {} FROM jobs WHERE company_handle = $1 ORDER BY id",
            QueryBuilder::JOB_COLUMNS
        );
        let jobs = sqlx::query_as::<_, JobRow>(&sql)
            .bind(handle)
            .fetch_all(&self.pool)
            .await?;

        Ok(CompanyDetail {
            company: company.into_domain(),
            jobs: jobs.into_iter().map(JobRow::into_domain).collect(),
        })
    }

    async fn update(
        &self,
        handle: &str,
        payload: &UpdatePayload,
    ) -> Result<Company, RepositoryError> {
        payload.ensure_excludes(Company::IMMUTABLE_FIELDS)?;
        let set = build_set_clause(payload, &COMPANY_FIELDS)?;
        let new_name = match payload.get("name") {
            Some(SqlValue::Text(name)) => Some(name.as_str()),
            _ => None,
        };

        let sql = QueryBuilder::update_returning(
            "companies",
            set.clause(),
            "handle",
            set.next_index(),
            QueryBuilder::COMPANY_COLUMNS,
        );
        debug!(%sql, params = set.values().len() + 1, "Updating company");

        let row = bind_values(sqlx::query_as::<_, CompanyRow>(&sql), set.values())
            .bind(handle)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, handle, new_name))?;

        row.map(CompanyRow::into_domain)
            .ok_or_else(|| RepositoryError::NotFound(format!("No company: {handle}")))
    }

    async fn remove(&self, handle: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM companies WHERE handle = $1")
            .bind(handle)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("No company: {handle}")));
        }

        Ok(())
    }
}
