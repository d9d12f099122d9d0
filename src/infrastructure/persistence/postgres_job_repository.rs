use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::query_builder::{bind_values, QueryBuilder};
use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::entities::{Job, NewJob};
use crate::sql::{
    build_job_filter, build_set_clause, FieldNameMap, FilterParams, InvalidInput, UpdatePayload,
};

const JOB_FIELDS: FieldNameMap<'static> = FieldNameMap::new(&[("companyHandle", "company_handle")]);

#[derive(Debug, sqlx::FromRow)]
#[sqlx(rename_all = "camelCase")]
pub(super) struct JobRow {
    id: i32,
    title: String,
    salary: Option<i32>,
    equity: Option<String>,
    company_handle: String,
}

impl JobRow {
    pub(super) fn into_domain(self) -> Job {
        Job {
            id: self.id,
            title: self.title,
            salary: self.salary,
            equity: self.equity,
            company_handle: self.company_handle,
        }
    }
}

/// PostgreSQL implementation of job repository
pub struct PostgresJobRepository {
    pool: PgPool,
}

impl PostgresJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PostgresJobRepository {
    async fn create(&self, job: &NewJob) -> Result<Job, RepositoryError> {
        let sql = format!(
            r#"
            INSERT INTO jobs (title, salary, equity, company_handle)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            QueryBuilder::JOB_COLUMNS
        );

        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(&job.title)
            .bind(job.salary)
            .bind(job.equity)
            .bind(job.company_handle.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                    InvalidInput::new(format!("No company: {}", job.company_handle)).into()
                }
                _ => RepositoryError::Downstream(e),
            })?;

        Ok(row.into_domain())
    }

    async fn find_all(&self, filters: &FilterParams) -> Result<Vec<Job>, RepositoryError> {
        let (where_clause, values) = build_job_filter(filters)?
            .map(|filter| filter.into_parts())
            .unwrap_or_default();

        let sql = QueryBuilder::select_jobs(&where_clause);
        debug!(%sql, params = values.len(), "Listing jobs");

        let rows = bind_values(sqlx::query_as::<_, JobRow>(&sql), &values)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(JobRow::into_domain).collect())
    }

    async fn get(&self, id: i32) -> Result<Job, RepositoryError> {
        let sql = format!("SELECT {} FROM jobs WHERE id = $1", QueryBuilder::JOB_COLUMNS);

        sqlx::query_as::<_, JobRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(JobRow::into_domain)
            .ok_or_else(|| RepositoryError::NotFound(format!("No job: {id}")))
    }

    async fn update(&self, id: i32, payload: &UpdatePayload) -> Result<Job, RepositoryError> {
        payload.ensure_excludes(Job::IMMUTABLE_FIELDS)?;
        let set = build_set_clause(payload, &JOB_FIELDS)?;

        let sql = QueryBuilder::update_returning(
            "jobs",
            set.clause(),
            "id",
            set.next_index(),
            QueryBuilder::JOB_COLUMNS,
        );
        debug!(%sql, params = set.values().len() + 1, "Updating job");

        bind_values(sqlx::query_as::<_, JobRow>(&sql), set.values())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(JobRow::into_domain)
            .ok_or_else(|| RepositoryError::NotFound(format!("No job: {id}")))
    }

    async fn remove(&self, id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("No job: {id}")));
        }

        Ok(())
    }
}
